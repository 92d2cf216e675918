//! Login page rendering

use crate::base_html;

/// Login form. Shown without the sidebar and never prefilled, since the
/// stored login belongs to whoever signed in last.
pub async fn page_login() -> axum::response::Html<String> {
    let content = String::from(
        r#"<div class='min-h-screen flex items-center justify-center'>
    <form method='post' action='/login' class='bg-white rounded-xl shadow-sm p-8 w-96 space-y-4'>
        <h1 class='text-2xl font-bold text-indigo-600'>Bits</h1>
        <p class='text-sm text-gray-500'>Sign in to view your transactions.</p>
        <div>
            <label for='username' class='block text-sm text-gray-600 mb-1'>Username</label>
            <input id='username' name='username' type='text' autocomplete='username' required
                class='w-full px-4 py-2 border rounded-lg'>
        </div>
        <div>
            <label for='password' class='block text-sm text-gray-600 mb-1'>Password</label>
            <input id='password' name='password' type='password' autocomplete='current-password' required
                class='w-full px-4 py-2 border rounded-lg'>
        </div>
        <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Sign in</button>
    </form>
</div>"#,
    );

    axum::response::Html(base_html("Login", &content))
}
