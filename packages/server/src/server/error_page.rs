use crate::domains::content::html::escape_text;
use crate::domains::content::sanitizer::VIEWPORT_CONTENT;

/// Branded page shown in the embedded frame when a proxied fetch fails.
pub fn render_error_page(url: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="{viewport}">
<title>Hello Net - Error</title>
<style>
body{{font-family:-apple-system,BlinkMacSystemFont,sans-serif;background:#111;color:#eee;margin:0;padding:24px;text-align:center}}
.error{{max-width:480px;margin:40px auto}}
h1{{font-size:20px;margin-bottom:12px}}
p{{color:#bbb;line-height:1.5;word-break:break-word}}
button{{margin-top:16px;padding:10px 20px;border:0;border-radius:8px;background:#3b82f6;color:#fff;font-size:15px}}
</style>
</head>
<body>
<div class="error">
<h1>Unable to Load Page</h1>
<p>Sorry, we couldn't load <strong>{url}</strong></p>
<p>Error: {message}</p>
<button onclick="history.back()">Go Back</button>
</div>
</body>
</html>
"#,
        viewport = VIEWPORT_CONTENT,
        url = escape_text(url),
        message = escape_text(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_url_and_message() {
        let page = render_error_page("https://x.test/?a=<b>", "HTTP 500: <oops>");
        assert!(page.contains("Unable to Load Page"));
        assert!(page.contains("https://x.test/?a=&lt;b&gt;"));
        assert!(page.contains("HTTP 500: &lt;oops&gt;"));
        assert!(!page.contains("<oops>"));
    }
}
