//! Emitter / re-flower (§4.5): serializes the tree depth-first. Control
//! totals and record counts are re-derived from the tree rather than copied
//! from whatever the parsed trailers reported, so a parse→emit round trip
//! always produces canonical output (a validating parse would already have
//! rejected a tree whose trailers disagreed with their recomputed values).
//!
//! Given `max_line_len`, any record whose rendered fields would overflow a
//! physical line is split at field boundaries into a header plus `88`
//! continuation lines (§8 scenario D).

use crate::model::File;
use crate::records;

/// Emits a BAI2 stream for `file` (§6 `Emit(File, maxLineLen?)`). `None`
/// puts every record's fields on a single physical line; `Some(n)` re-flows
/// any record whose rendering would exceed `n` bytes into `88`
/// continuations.
pub fn emit(file: &File, max_line_len: Option<usize>) -> String {
    let span = tracing::debug_span!("emit", max_line_len = max_line_len.unwrap_or(0));
    let _enter = span.enter();

    let mut out = String::new();
    push_record(&mut out, "01", &records::render_file_header(file), max_line_len);
    for group in &file.groups {
        push_record(&mut out, "02", &records::render_group_header(group), max_line_len);
        for account in &group.accounts {
            push_record(&mut out, "03", &records::render_account_header(account), max_line_len);
            for tx in &account.transactions {
                push_record(&mut out, "16", &records::render_transaction(tx), max_line_len);
            }
            push_record(&mut out, "49", &records::render_account_trailer(account), max_line_len);
        }
        push_record(&mut out, "98", &records::render_group_trailer(group), max_line_len);
    }
    push_record(&mut out, "99", &records::render_file_trailer(file), max_line_len);
    out
}

fn push_record(out: &mut String, code: &str, fields: &[String], max_line_len: Option<usize>) {
    for line in reflow(code, fields, max_line_len) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Splits `fields` into one or more physical lines, the first headed by
/// `code` and any overflow headed by `88`, each comma-joined and
/// `/`-terminated. Splits occur only at field boundaries (§4.2 Render): a
/// single field wider than `max_len` on its own is still emitted whole.
fn reflow(code: &str, fields: &[String], max_len: Option<usize>) -> Vec<String> {
    let Some(max_len) = max_len else {
        return vec![format_line(code, fields)];
    };

    let mut lines = Vec::new();
    let mut current_code = code;
    let mut current: Vec<String> = Vec::new();

    for field in fields {
        let mut tentative = current.clone();
        tentative.push(field.clone());
        if format_line(current_code, &tentative).len() > max_len && !current.is_empty() {
            lines.push(format_line(current_code, &current));
            current_code = "88";
            current = vec![field.clone()];
        } else {
            current = tentative;
        }
    }
    lines.push(format_line(current_code, &current));
    lines
}

fn format_line(code: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        format!("{code}/")
    } else {
        format!("{code},{}/", fields.join(","))
    }
}

impl File {
    /// `File::emit` wrapper matching the documented core surface (§6).
    pub fn emit(&self, max_line_len: Option<usize>) -> String {
        emit(self, max_line_len)
    }
}
