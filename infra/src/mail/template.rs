//! Verification email content

use chrono::{Datelike, Utc};

/// Subject line of every verification email
pub const VERIFICATION_SUBJECT: &str = "Verify Your Email Address";

/// Plain-text body
pub fn render_text(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your verification code is: {code}\n\n\
         This code expires in {expires_in_minutes} minutes.\n\
         If you did not request this code, you can ignore this email.\n"
    )
}

/// HTML body with the code, an expiry notice and a footer naming the sender
pub fn render_html(code: &str, expires_in_minutes: i64, sender_name: &str) -> String {
    let year = Utc::now().year();
    let sender_name = escape_html(sender_name);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{VERIFICATION_SUBJECT}</title>
</head>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f5; padding: 24px;">
<div style="max-width: 480px; margin: 0 auto; background: #ffffff; border-radius: 8px; padding: 32px;">
<h1 style="font-size: 22px; color: #18181b;">Email Verification</h1>
<p style="color: #3f3f46;">Use the code below to verify your email address.</p>
<p style="font-size: 32px; font-weight: bold; letter-spacing: 6px; text-align: center; color: #18181b;">{code}</p>
<p style="color: #3f3f46;">This code expires in {expires_in_minutes} minutes.</p>
<p style="color: #71717a; font-size: 13px;">If you did not request this code, you can ignore this email.</p>
</div>
<p style="text-align: center; color: #a1a1aa; font-size: 12px;">&copy; {year} {sender_name}</p>
</body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_contains_code_and_expiry() {
        let text = render_text("482913", 10);
        assert!(text.contains("482913"));
        assert!(text.contains("10 minutes"));
    }

    #[test]
    fn test_html_contains_code_heading_and_footer() {
        let html = render_html("482913", 10, "VeriMail");
        let year = Utc::now().year().to_string();

        assert!(html.contains("Email Verification"));
        assert!(html.contains(">482913<"));
        assert!(html.contains(&format!("&copy; {} VeriMail", year)));
    }

    #[test]
    fn test_html_escapes_sender_name() {
        let html = render_html("482913", 10, "<script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
