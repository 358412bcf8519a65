//! HTML rendering
//!
//! Pages are small enough to build with `format!`. Every value that comes
//! from the roster or a form goes through [`escape`].

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use lime_types::{Role, User};

/// Placeholder third-party integrations shown on the connections page
pub const CONNECTIONS: &[&str] = &["Hubspot", "Linear", "Slack"];

/// Escape text for use in element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 302 with a `Location` header and no body
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn nav(user: Option<&User>) -> String {
    let mut nav = String::from(r#"<a href="/">Home</a> "#);
    match user {
        Some(user) => {
            nav.push_str(r#"<a href="/logout">Logout</a> "#);
            if user.is_admin() {
                nav.push_str(r#"<a href="/connections">Connections</a> "#);
                nav.push_str(r#"<a href="/users">Users</a> "#);
            }
        }
        None => nav.push_str(r#"<a href="/login">Login</a>"#),
    }
    nav
}

/// Wrap `content` (already HTML) in the shared page layout
pub fn page(title: &str, content: &str, user: Option<&User>) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title}</title></head><body><h1>{title}</h1><nav>{nav}</nav>{content}</body></html>",
        title = escape(title),
        nav = nav(user),
        content = content,
    ))
}

/// Generic failure page; always served with 200
pub fn error_page(message: &str, user: Option<&User>) -> Html<String> {
    page("Error", &format!("<p>{}</p>", escape(message)), user)
}

pub fn home(user: Option<&User>) -> Html<String> {
    page("Lime Tools", "<p>Welcome to Lime Tools.</p>", user)
}

pub fn login(error: Option<&str>, user: Option<&User>) -> Html<String> {
    let mut content = String::new();
    if let Some(error) = error {
        content.push_str(&format!("<p>{}</p>", escape(error)));
    }
    content.push_str(concat!(
        r#"<form method="POST" action="/login">"#,
        r#"<label>Email:<input name="mail"/></label><br/>"#,
        r#"<label>Password:<input type="password" name="password"/></label><br/>"#,
        r#"<button type="submit">Login</button></form>"#,
    ));
    page("Login", &content, user)
}

pub fn connections(user: &User) -> Html<String> {
    let items: String = CONNECTIONS
        .iter()
        .map(|name| format!("<li>{} - <button>Connect</button></li>", name))
        .collect();
    page(
        "Connections",
        &format!("<p>Connect your accounts:</p><ul>{}</ul>", items),
        Some(user),
    )
}

fn role_select(selected: Role) -> String {
    let option = |role: Role, label: &str| {
        let mark = if role == selected { " selected" } else { "" };
        format!(r#"<option value="{}"{}>{}</option>"#, role, mark, label)
    };
    format!(
        r#"<select name="type">{}{}</select>"#,
        option(Role::User, "User"),
        option(Role::Admin, "Admin")
    )
}

pub fn users(roster: &[User], admin: &User) -> Html<String> {
    let rows: String = roster
        .iter()
        .map(|u| {
            let mail = escape(&u.email);
            format!(
                concat!(
                    "<tr><td>{name}</td><td>{surname}</td><td>{mail}</td><td>{role}</td><td>",
                    r#"<form method="POST" action="/users/delete" style="display:inline">"#,
                    r#"<input type="hidden" name="mail" value="{mail}"/><button type="submit">Delete</button></form>"#,
                    r#"<form method="POST" action="/users/edit" style="display:inline">"#,
                    r#"<input type="hidden" name="origMail" value="{mail}"/><button type="submit">Edit</button></form>"#,
                    "</td></tr>",
                ),
                name = escape(&u.name),
                surname = escape(&u.surname),
                mail = mail,
                role = u.role,
            )
        })
        .collect();

    let table = format!(
        r#"<table border="1"><tr><th>Name</th><th>Surname</th><th>Email</th><th>Type</th><th>Actions</th></tr>{}</table>"#,
        rows
    );
    let form = format!(
        concat!(
            r#"<h2>Add User</h2><form method="POST" action="/users/add">"#,
            r#"<input name="name" placeholder="Name"/> <input name="surname" placeholder="Surname"/> "#,
            r#"<input name="mail" placeholder="Email"/> <input name="password" placeholder="Password"/> "#,
            r#"{} <button type="submit">Add</button></form>"#,
        ),
        role_select(Role::User)
    );

    page("User Management", &(table + &form), Some(admin))
}

/// Pre-filled edit form.
///
/// The password input is pre-filled so a full-replace update keeps it, but
/// it is a masked `type="password"` field. Earlier versions of the console
/// showed it as plain text; masking it is a deliberate change.
pub fn edit_user(target: &User, admin: &User) -> Html<String> {
    let form = format!(
        concat!(
            r#"<form method="POST" action="/users/update">"#,
            r#"<input type="hidden" name="origMail" value="{mail}"/>"#,
            r#"<input name="name" value="{name}"/>"#,
            r#"<input name="surname" value="{surname}"/>"#,
            r#"<input name="mail" value="{mail}"/>"#,
            r#"<input type="password" name="password" value="{password}"/>"#,
            r#"{select}<button type="submit">Update</button></form>"#,
        ),
        mail = escape(&target.email),
        name = escape(&target.name),
        surname = escape(&target.surname),
        password = escape(&target.password),
        select = role_select(target.role),
    );
    page("Edit User", &form, Some(admin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            name: "Ada".to_string(),
            surname: "Admin".to_string(),
            email: "admin@x.com".to_string(),
            password: "secret".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_nav_depends_on_role() {
        let anon = page("T", "", None).0;
        assert!(anon.contains(r#"href="/login""#));
        assert!(!anon.contains(r#"href="/users""#));

        let mut user = admin();
        user.role = Role::User;
        let signed_in = page("T", "", Some(&user)).0;
        assert!(signed_in.contains(r#"href="/logout""#));
        assert!(!signed_in.contains(r#"href="/connections""#));

        let admin_page = page("T", "", Some(&admin())).0;
        assert!(admin_page.contains(r#"href="/connections""#));
        assert!(admin_page.contains(r#"href="/users""#));
    }

    #[test]
    fn test_users_table_escapes_values() {
        let mut evil = admin();
        evil.name = "<script>".to_string();
        let html = users(&[evil], &admin()).0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<td><script>"));
    }

    #[test]
    fn test_edit_form_selects_current_role() {
        let html = edit_user(&admin(), &admin()).0;
        assert!(html.contains(r#"<option value="admin" selected>"#));
        assert!(html.contains(r#"<option value="user">"#));
        assert!(html.contains(r#"name="origMail" value="admin@x.com""#));
    }

    #[test]
    fn test_found_has_location_and_no_body() {
        let response = found("/users");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/users");
    }
}
