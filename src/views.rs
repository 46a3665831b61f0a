use std::fmt::Write;

use crate::models::form::FormField;
use crate::models::status::FormSnapshot;
use crate::validation::{FieldError, CARD_NUMBER_DIGITS, CVV_DIGITS};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f9fafb;margin:0;padding:3rem 1rem}\
main{max-width:28rem;margin:0 auto}\
h2{text-align:center;font-size:1.875rem;color:#111827}\
label{display:block;font-size:.875rem;font-weight:500;color:#374151;margin-top:1rem}\
input{display:block;width:100%;box-sizing:border-box;margin-top:.25rem;padding:.5rem;border:1px solid #d1d5db;border-radius:.375rem}\
fieldset{border:0;background:#f3f4f6;border-radius:.5rem;padding:1rem;margin-top:1.5rem}\
legend{font-size:1.125rem;font-weight:500;color:#111827;float:left;width:100%}\
.field-error{color:#b91c1c;font-size:.75rem;margin:.25rem 0 0}\
.alert{border-radius:.375rem;padding:1rem;margin-top:1.5rem}\
.alert-error{background:#fef2f2;color:#991b1b}\
.alert-success{background:#f0fdf4;color:#166534}\
.alert h3{font-size:.875rem;margin:0}\
.alert p{font-size:.875rem;margin:.5rem 0 0}\
button{width:100%;margin-top:1.5rem;padding:.5rem 1rem;border:0;border-radius:.375rem;color:#fff;background:#4f46e5;font-weight:500}\
button:disabled{background:#818cf8}";

/// Render the rental form page for the given state.
pub fn render_page(snapshot: &FormSnapshot, field_errors: &[FieldError]) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Bike Rental Form</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<main>\n<h2>Bike Rental Form</h2>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");

    for field in [FormField::CustomerName, FormField::BikeLocation, FormField::BikeId] {
        render_input(&mut html, snapshot, field, field_errors);
    }

    html.push_str("<fieldset>\n<legend>Payment Information</legend>\n");
    for field in [
        FormField::CreditCardName,
        FormField::CreditCardNumber,
        FormField::CreditCardCvv,
    ] {
        render_input(&mut html, snapshot, field, field_errors);
    }
    html.push_str("</fieldset>\n");

    if let Some(message) = &snapshot.status.error {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-error\" role=\"alert\"><h3>Error submitting form</h3><p>{}</p></div>",
            escape_html(message)
        );
    }
    if snapshot.status.success {
        html.push_str(
            "<div class=\"alert alert-success\" role=\"status\"><h3>Form submitted successfully</h3></div>\n",
        );
    }

    if snapshot.status.is_loading {
        html.push_str("<button type=\"submit\" disabled>Submitting...</button>\n");
    } else {
        html.push_str("<button type=\"submit\">Submit</button>\n");
    }

    html.push_str("</form>\n</main>\n</body>\n</html>\n");
    html
}

fn render_input(
    html: &mut String,
    snapshot: &FormSnapshot,
    field: FormField,
    field_errors: &[FieldError],
) {
    let name = field.name();
    let constraint = match field {
        FormField::CreditCardNumber => format!(
            " maxlength=\"{0}\" pattern=\"\\d{{{0}}}\" inputmode=\"numeric\"",
            CARD_NUMBER_DIGITS
        ),
        FormField::CreditCardCvv => format!(
            " maxlength=\"{0}\" pattern=\"\\d{{{0}}}\" inputmode=\"numeric\"",
            CVV_DIGITS
        ),
        _ => String::new(),
    };

    let _ = writeln!(html, "<label for=\"{}\">{}</label>", name, field.label());
    let _ = writeln!(
        html,
        "<input id=\"{0}\" name=\"{0}\" type=\"text\" required value=\"{1}\" placeholder=\"{2}\"{3}>",
        name,
        escape_html(snapshot.form.get(field)),
        placeholder(field),
        constraint
    );

    for err in field_errors.iter().filter(|e| e.field == field) {
        let _ = writeln!(html, "<p class=\"field-error\">{}</p>", escape_html(&err.message));
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::CustomerName | FormField::CreditCardName => "John Doe",
        FormField::BikeLocation => "Store Location",
        FormField::BikeId => "BIKE123",
        FormField::CreditCardNumber => "1234 5678 9012 3456",
        FormField::CreditCardCvv => "123",
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
