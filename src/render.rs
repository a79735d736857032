//! HTML rendering for outgoing emails.

use crate::config::SenderConfig;

const STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; }
        .footer { font-size: 12px; color: #777; margin-top: 30px; border-top: 1px solid #eee; padding-top: 20px; }
        .signature { margin-top: 20px; }";

const FOOTER: &str = "This email is intended only for the addressee and may contain confidential information. \
If you are not the intended recipient, please delete this email and notify the sender.";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

/// Wrap a plain-text body in the agency's HTML layout with signature and footer.
pub fn render_html_email(body: &str, sender: &SenderConfig) -> String {
    let body_html = escape_html(&body.replace("\r\n", "\n")).replace('\n', "<br>");
    format!(
        "<!DOCTYPE html>
<html>
<head>
    <style>
        {style}
    </style>
</head>
<body>
    <div class=\"container\">
        {body_html}

        <div class=\"signature\">
            <strong>{name}</strong><br>
            Insurance Specialist<br>
            Phone: {phone}<br>
            Email: {email}
        </div>

        <div class=\"footer\">
            {footer}
        </div>
    </div>
</body>
</html>
",
        style = STYLE,
        body_html = body_html,
        name = escape_html(&sender.from_name),
        phone = escape_html(&sender.contact_phone),
        email = escape_html(&sender.from_email),
        footer = FOOTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_breaks() {
        let html = render_html_email("Dear Ana,\n\nThanks.", &SenderConfig::default());
        assert!(html.contains("Dear Ana,<br><br>Thanks."));
        assert!(html.contains("<strong>Insurance Specialist</strong>"));
        assert!(html.contains("Phone: (555) 123-4567"));
    }

    #[test]
    fn body_markup_is_escaped() {
        let html = render_html_email("<script>x</script> & co", &SenderConfig::default());
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn sender_identity_is_used() {
        let sender = SenderConfig {
            from_name: "Dana Reyes".into(),
            from_email: "dana@agency.test".into(),
            contact_phone: "555-0100".into(),
        };
        let html = render_html_email("Hi", &sender);
        assert!(html.contains("<strong>Dana Reyes</strong>"));
        assert!(html.contains("Email: dana@agency.test"));
    }
}
