use crate::models::ExtractedFields;

/// Field categories the extraction prompt asks the model to pull out of a
/// policy document.
pub const EXTRACTION_CATEGORIES: [&str; 7] = [
    "Coverage Details",
    "Exclusions",
    "Premium Structure",
    "Waiting Periods",
    "Maximum and Minimum Age Limit",
    "Claim Process",
    "Policy Term",
];

/// Instruction asking the model to extract the named categories from one
/// document's OCR text. The text is embedded verbatim.
pub fn extraction_prompt(text: &str) -> String {
    let mut categories = String::new();
    for (i, category) in EXTRACTION_CATEGORIES.iter().enumerate() {
        categories.push_str(&format!("{}. {}\n", i + 1, category));
    }

    format!(
        "Extract the following fields from the insurance document:\n\
         {categories}\n\
         Return this in a JSON format with proper field names and short values.\n\
         Document Text:\n\
         {text}"
    )
}

/// Instruction asking the model for a point-wise comparison of two plans.
/// Both extracted field sets are embedded verbatim under their labels.
pub fn comparison_prompt(left: &ExtractedFields, right: &ExtractedFields) -> String {
    format!(
        "Compare the two insurance plans below. Focus on differences in coverage, \
         exclusions, premiums, waiting periods and eligibility terms.\n\n\
         {}:\n{}\n\n\
         {}:\n{}\n\n\
         Summarize the key differences in a clear, point-wise manner.",
        left.label, left.content, right.label, right.content
    )
}

/// Instruction asking the model to summarize customer review sentiment for
/// one insurer.
pub fn review_prompt(insurer: &str, reviews: &[String]) -> String {
    let joined = reviews.join("\n\n");
    format!(
        "Analyze these customer reviews for {insurer} and summarize the overall \
         sentiment in bullet points.\n\
         Focus on recurring positives and negatives.\n\n\
         Reviews:\n\
         {joined}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_text_verbatim() {
        let text = "annual premium $500, covers hospitalization";
        let prompt = extraction_prompt(text);
        assert!(prompt.contains(text));
        for category in EXTRACTION_CATEGORIES {
            assert!(prompt.contains(category), "missing category {category}");
        }
    }

    #[test]
    fn comparison_prompt_embeds_both_documents_verbatim() {
        let left = ExtractedFields {
            label: "plan_a.pdf".to_string(),
            content: "annual premium $500, covers hospitalization".to_string(),
        };
        let right = ExtractedFields {
            label: "plan_b.pdf".to_string(),
            content: "annual premium $700, excludes pre-existing conditions".to_string(),
        };

        let prompt = comparison_prompt(&left, &right);
        assert!(prompt.contains(&left.content));
        assert!(prompt.contains(&right.content));
        assert!(prompt.contains("plan_a.pdf"));
        assert!(prompt.contains("plan_b.pdf"));
    }

    #[test]
    fn review_prompt_names_the_insurer_and_quotes_reviews() {
        let reviews = vec![
            "Great service and responsive agents.".to_string(),
            "Claim process was a bit slow.".to_string(),
        ];
        let prompt = review_prompt("Sun Life", &reviews);
        assert!(prompt.contains("Sun Life"));
        for review in &reviews {
            assert!(prompt.contains(review.as_str()));
        }
    }
}
