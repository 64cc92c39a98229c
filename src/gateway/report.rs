//! Email bodies
//!
//! Bare HTML: a heading and a table of records, or a short notice.
//! Interpolated values are escaped.

use super::data::RecordEntry;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Subject line of the report sent to the doctor
pub fn report_subject(name: &str) -> String {
    format!("Health Report of {}", name)
}

/// Subject line of the doctor-email update notice
pub const UPDATE_NOTICE_SUBJECT: &str = "[Docs] Doctors Email Update";

/// Table of a patient's records, newest first
pub fn render_report(name: &str, email: &str, entries: &[RecordEntry]) -> String {
    let mut html = String::from("<html><body>");
    html.push_str(&format!("<h3>Health Records: {}</h3>", escape(name)));
    html.push_str(&format!("<h5>Patient email: {}</h5>", escape(email)));
    html.push_str("<table><thead><tr><th>Time</th><th>Parameter</th><th>Value</th></tr></thead><tbody>");

    for entry in entries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&entry.time),
            escape(&entry.parameter),
            escape(&entry.value)
        ));
    }

    html.push_str("</tbody></table><p>powered by: Docs</p></body></html>");
    html
}

/// Notice asking the user to get their doctor's address updated
pub fn render_update_notice(name: &str) -> String {
    format!(
        "<html><body><p>Hi {},</p><p>We received a request to update the email address \
         we share your health reports with. Reply to this message with your doctor's \
         address and our developers will update it.</p><p>Docs</p></body></html>",
        escape(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report_rows_in_order() {
        let entries = vec![
            RecordEntry {
                time: "2026-10-19T09:30:00Z".into(),
                parameter: "heart rate".into(),
                value: "72".into(),
            },
            RecordEntry {
                time: "2026-10-18T08:00:00Z".into(),
                parameter: "weight".into(),
                value: "70 kg".into(),
            },
        ];

        let html = render_report("Ana", "a@b.com", &entries);

        assert!(html.contains("<h3>Health Records: Ana</h3>"));
        assert!(html.contains("<h5>Patient email: a@b.com</h5>"));
        let first = html.find("heart rate").unwrap();
        let second = html.find("weight").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_values_are_escaped() {
        let entries = vec![RecordEntry {
            time: "t".into(),
            parameter: "<script>".into(),
            value: "1 & 2".into(),
        }];

        let html = render_report("O'Neil", "a@b.com", &entries);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("1 &amp; 2"));
        assert!(html.contains("O&#39;Neil"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_subjects() {
        assert_eq!(report_subject("Ana"), "Health Report of Ana");
        assert!(render_update_notice("Ana").contains("Hi Ana,"));
    }
}
