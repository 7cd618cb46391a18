use chrono::Utc;
use plan_compare::{ComparisonReport, ReviewSentiment};

const PAGE_STYLE: &str = r#"
    body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem auto; max-width: 960px; color: #1c1e21; }
    h1 { font-size: 1.5rem; }
    .meta { color: #666; font-size: 0.85rem; margin-bottom: 1.5rem; }
    .summary, .fields, .reviews { border: 1px solid #ddd; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1.5rem; }
    .columns { display: flex; gap: 1.5rem; }
    .columns > div { flex: 1; }
    .text { white-space: pre-wrap; font-size: 0.95rem; }
    .error { border: 1px solid #c0392b; background: #fdf3f2; border-radius: 6px; padding: 1rem 1.25rem; color: #c0392b; }
    form label { display: block; margin: 0.75rem 0 0.25rem; }
    button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>{PAGE_STYLE}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>"
    )
}

/// Upload form: two scanned PDFs, optional insurer names for the review
/// sentiment sections.
pub fn index_page() -> String {
    page(
        "Insurance Plan Comparison",
        r#"<h1>Insurance Plan Comparison</h1>
<p>Upload two scanned insurance plan PDFs to get a side-by-side summary of
differences in coverage, exclusions, premiums and eligibility.</p>
<form action="/compare" method="post" enctype="multipart/form-data">
  <label for="pdfs">Plan documents (exactly two PDFs)</label>
  <input type="file" id="pdfs" name="pdfs" accept="application/pdf" multiple required>
  <label for="insurer_a">Insurer A name (optional, adds customer review sentiment)</label>
  <input type="text" id="insurer_a" name="insurer_a">
  <label for="insurer_b">Insurer B name (optional)</label>
  <input type="text" id="insurer_b" name="insurer_b">
  <button type="submit">Compare plans</button>
</form>"#,
    )
}

/// Renders a finished comparison. Pure formatting: the comparison summary
/// and both extracted field sets are shown as the model produced them.
pub fn report_page(report: &ComparisonReport, sentiments: &[ReviewSentiment]) -> String {
    let reference = format!("CMP-{:08X}", rand::random::<u32>());
    let generated_at = Utc::now().format("%Y-%m-%d %H:%M UTC");

    let mut body = format!(
        "<h1>Comparison: {left} vs {right}</h1>\n\
         <div class=\"meta\">Reference {reference} &middot; generated {generated_at}</div>\n\
         <div class=\"summary\">\n\
         <h2>Key differences</h2>\n\
         <div class=\"text\">{summary}</div>\n\
         </div>\n",
        left = escape_html(&report.result.left_label),
        right = escape_html(&report.result.right_label),
        summary = escape_html(&report.result.summary),
    );

    body.push_str(&format!(
        "<div class=\"fields\">\n\
         <h2>Extracted fields</h2>\n\
         <div class=\"columns\">\n\
         <div><h3>{left}</h3><div class=\"text\">{left_content}</div></div>\n\
         <div><h3>{right}</h3><div class=\"text\">{right_content}</div></div>\n\
         </div>\n\
         </div>\n",
        left = escape_html(&report.left.label),
        right = escape_html(&report.right.label),
        left_content = escape_html(&report.left.content),
        right_content = escape_html(&report.right.content),
    ));

    for sentiment in sentiments {
        body.push_str(&format!(
            "<div class=\"reviews\">\n\
             <h2>Customer sentiment: {insurer}</h2>\n\
             <div class=\"text\">{summary}</div>\n\
             </div>\n",
            insurer = escape_html(&sentiment.insurer),
            summary = escape_html(&sentiment.summary),
        ));
    }

    body.push_str("<p><a href=\"/\">Compare two more plans</a></p>");

    page("Plan Comparison Result", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Comparison failed</h1>\n\
         <div class=\"error\">{}</div>\n\
         <p><a href=\"/\">Back to upload</a></p>",
        escape_html(message)
    );
    page("Comparison failed", &body)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_compare::{ComparisonResult, ExtractedFields};

    fn sample_report(summary: &str) -> ComparisonReport {
        ComparisonReport {
            result: ComparisonResult {
                left_label: "plan_a.pdf".to_string(),
                right_label: "plan_b.pdf".to_string(),
                summary: summary.to_string(),
            },
            left: ExtractedFields {
                label: "plan_a.pdf".to_string(),
                content: "annual premium $500, covers hospitalization".to_string(),
            },
            right: ExtractedFields {
                label: "plan_b.pdf".to_string(),
                content: "annual premium $700, excludes pre-existing conditions".to_string(),
            },
        }
    }

    #[test]
    fn report_contains_the_comparison_summary_verbatim() {
        let html = report_page(&sample_report("Premiums differ: $500 vs $700"), &[]);
        assert!(html.contains("Premiums differ: $500 vs $700"));
        assert!(html.contains("plan_a.pdf"));
        assert!(html.contains("plan_b.pdf"));
    }

    #[test]
    fn report_includes_review_sections_when_present() {
        let sentiments = vec![ReviewSentiment {
            insurer: "Sun Life".to_string(),
            summary: "- mostly positive".to_string(),
        }];
        let html = report_page(&sample_report("differs"), &sentiments);
        assert!(html.contains("Customer sentiment: Sun Life"));
        assert!(html.contains("- mostly positive"));
    }

    #[test]
    fn markup_in_model_output_is_escaped() {
        let html = report_page(&sample_report("<script>alert(1)</script>"), &[]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn form_posts_two_files_to_compare() {
        let html = index_page();
        assert!(html.contains("action=\"/compare\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("name=\"pdfs\""));
    }
}
