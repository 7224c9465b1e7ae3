//! CSV export of contact leads for the dashboard download button.

use crate::models::ContactLead;

const HEADER: [&str; 9] = [
    "id",
    "name",
    "email",
    "phone",
    "company",
    "marketingSpend",
    "location",
    "content",
    "createdAt",
];

/// Render leads as RFC 4180 CSV with a header row and CRLF line endings.
pub fn contacts_to_csv(leads: &[ContactLead]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().copied());

    for lead in leads {
        let created_at = lead.created_at.to_string();
        push_row(
            &mut out,
            [
                lead.id.as_str(),
                lead.name.as_str(),
                lead.email.as_str(),
                lead.phone.as_str(),
                lead.company.as_str(),
                lead.marketing_spend.as_deref().unwrap_or(""),
                lead.location.as_str(),
                lead.content.as_str(),
                created_at.as_str(),
            ],
        );
    }

    out
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    // Leading formula characters are neutralised so spreadsheets treat the cell as text
    let guarded = matches!(field.chars().next(), Some('=' | '+' | '-' | '@'));
    let needs_quotes =
        guarded || field.contains([',', '"', '\r', '\n']) || field.starts_with(' ');

    if !needs_quotes {
        out.push_str(field);
        return;
    }

    out.push('"');
    if guarded {
        out.push('\'');
    }
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
