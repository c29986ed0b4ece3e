//! Page chrome shared by every HTML view.

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f9fafb; color: #111827; }
header, main, footer { max-width: 72rem; margin: 0 auto; padding: 0.75rem 1rem; }
header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid #e5e7eb; }
header nav a { margin-left: 1rem; }
a.active { font-weight: 600; text-decoration: underline; }
.grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); list-style: none; padding: 0; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 1rem; overflow: hidden; }
.card img { width: 100%; aspect-ratio: 16 / 9; object-fit: cover; background: #f3f4f6; }
.center { text-align: center; padding: 4rem 0; }
.error { color: #b91c1c; }
footer { text-align: center; font-size: 0.75rem; color: #6b7280; padding-top: 2.5rem; }
"#;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NavItem {
    Home,
    About,
    Detail,
}

pub fn layout(title: &str, active: NavItem, content: &str) -> String {
    let class = |item: NavItem| if item == active { r#" class="active""# } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - World Data Dashboard</title>
    <style>{style}</style>
</head>
<body>
    <header>
        <a href="/"><strong>🌍 World Data Dashboard</strong></a>
        <nav>
            <a href="/"{home}>Home</a>
            <a href="/about"{about}>About</a>
        </nav>
    </header>
    <main>
{content}
    </main>
    <footer>Data from REST Countries (v3). This app fetches public data over HTTPS.</footer>
</body>
</html>"#,
        title = escape(title),
        style = STYLE,
        home = class(NavItem::Home),
        about = class(NavItem::About),
        content = content,
    )
}
