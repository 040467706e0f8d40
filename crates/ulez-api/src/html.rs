//! # HTML Rendering
//!
//! Server-rendered pages for the browser surface: the search form and
//! the result page. Pages are small enough that they are built as
//! escaped strings here rather than through a template engine.
//!
//! The result page renders errors in-page (the browser flow keeps HTTP
//! 200 and shows the message), unlike the JSON API which carries the
//! error class in the status code.

use ulez_core::{ComplianceResult, EmissionsValue};

/// Escape text for interpolation into HTML content.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; color: #1a1a2e; }}\n\
         form {{ display: flex; gap: .5rem; }}\n\
         input[type=text] {{ flex: 1; padding: .6rem; font-size: 1.1rem; text-transform: uppercase; }}\n\
         button {{ padding: .6rem 1.2rem; font-size: 1rem; cursor: pointer; }}\n\
         .verdict {{ padding: 1rem; border-radius: .5rem; margin: 1rem 0; }}\n\
         .compliant {{ background: #e6f7ee; border: 1px solid #2e9e5b; }}\n\
         .non-compliant {{ background: #fdecea; border: 1px solid #c0392b; }}\n\
         .error {{ background: #fff4e5; border: 1px solid #e67e22; padding: 1rem; border-radius: .5rem; }}\n\
         dt {{ font-weight: 600; }}\n\
         dd {{ margin: 0 0 .5rem 0; }}\n\
         .note {{ color: #555; font-size: .9rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>ULEZ Compliance Checker</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
    )
}

/// The search form on `GET /`.
pub fn index_page() -> String {
    page(
        "ULEZ Compliance Checker",
        "<p>Check whether a vehicle meets Ultra Low Emission Zone standards.</p>\n\
         <form action=\"/\" method=\"get\" onsubmit=\"location.href='/'+encodeURIComponent(this.reg.value.trim());return false;\">\n\
         <input type=\"text\" name=\"reg\" placeholder=\"Enter registration e.g. AB12 CDE\" required>\n\
         <button type=\"submit\">Check</button>\n\
         </form>\n",
    )
}

/// The result page for a resolved registration.
pub fn result_page(result: &ComplianceResult) -> String {
    let (class, verdict) = if result.compliant {
        ("compliant", "Compliant — no daily charge")
    } else {
        ("non-compliant", "Not compliant")
    };

    let mut details = String::new();
    details.push_str(&format!(
        "<dt>Registration</dt><dd>{}</dd>\n",
        escape(&result.registration)
    ));
    if let Some(make_model) = &result.make_model {
        details.push_str(&format!("<dt>Vehicle</dt><dd>{}</dd>\n", escape(make_model)));
    }
    if let Some(year) = result.year {
        details.push_str(&format!("<dt>Year</dt><dd>{year}</dd>\n"));
    }
    if let Some(engine_category) = &result.engine_category {
        details.push_str(&format!(
            "<dt>Emission standard</dt><dd>{}</dd>\n",
            escape(engine_category)
        ));
    }
    if let Some(emissions) = &result.co2_emissions {
        let text = match emissions {
            EmissionsValue::Numeric(n) => format!("{n} g/km"),
            EmissionsValue::Label(label) => escape(label),
        };
        details.push_str(&format!("<dt>CO2 emissions</dt><dd>{text}</dd>\n"));
    }
    if let Some(charge) = result.charge {
        details.push_str(&format!("<dt>Daily charge</dt><dd>£{charge:.2}</dd>\n"));
    }

    let note = match &result.message {
        Some(message) => format!("<p class=\"note\">{}</p>\n", escape(message)),
        None => String::new(),
    };

    page(
        &format!("{} — ULEZ Compliance", result.registration),
        &format!(
            "<div class=\"verdict {class}\"><strong>{verdict}</strong></div>\n\
             <dl>\n{details}</dl>\n\
             {note}\
             <p><a href=\"/\">Check another vehicle</a></p>\n"
        ),
    )
}

/// The result page rendering an error block instead of a verdict.
pub fn error_page(registration: &str, message: &str) -> String {
    page(
        "ULEZ Compliance Checker",
        &format!(
            "<div class=\"error\"><strong>{}</strong><br>{}</div>\n\
             <p><a href=\"/\">Try again</a></p>\n",
            escape(message),
            escape(registration),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComplianceResult {
        ComplianceResult {
            registration: "AB12CDE".to_string(),
            compliant: false,
            make_model: Some("FORD Focus".to_string()),
            year: Some(2004),
            engine_category: Some("Euro 3".to_string()),
            co2_emissions: Some(EmissionsValue::Numeric(180)),
            charge: Some(12.50),
            message: Some("Vehicle is not compliant with ULEZ standards".to_string()),
        }
    }

    #[test]
    fn result_page_shows_charge_when_non_compliant() {
        let html = result_page(&sample());
        assert!(html.contains("Not compliant"));
        assert!(html.contains("£12.50"));
        assert!(html.contains("FORD Focus"));
        assert!(html.contains("180 g/km"));
    }

    #[test]
    fn result_page_omits_charge_when_compliant() {
        let mut result = sample();
        result.compliant = true;
        result.charge = None;
        let html = result_page(&result);
        assert!(html.contains("no daily charge"));
        assert!(!html.contains("Daily charge"));
    }

    #[test]
    fn error_page_escapes_registration() {
        let html = error_page("<script>alert(1)</script>", "Invalid registration format");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn index_page_has_form() {
        let html = index_page();
        assert!(html.contains("<form"));
        assert!(html.contains("registration"));
    }
}
