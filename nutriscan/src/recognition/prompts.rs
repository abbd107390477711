//! Prompt templates for vision-language food recognition.

/// Prompt asking a vision model to describe the foods in an image as JSON.
///
/// The reply format matches what [`super::parse`] reads first; anything else
/// falls back to the line-oriented text reader.
///
/// # Example
/// ```
/// use nutriscan::recognition::prompts::food_analysis_prompt;
///
/// let prompt = food_analysis_prompt();
/// assert!(prompt.contains("estimated_weight_grams"));
/// ```
pub fn food_analysis_prompt() -> String {
    r#"Analyze the food in this image. Output JSON only, in this format:
{
  "foods": [
    {
      "en_name": "food name",
      "estimated_weight_grams": 150,
      "confidence": 0.9,
      "method": "raw/cooked/fried/steamed etc."
    }
  ]
}

Requirements:
- Estimate portions carefully
- Use USDA database food names
- Reasonable weight estimates in grams
- Give the median if uncertain"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_analysis_prompt_describes_schema() {
        let prompt = food_analysis_prompt();
        for field in ["foods", "en_name", "estimated_weight_grams", "confidence", "method"] {
            assert!(prompt.contains(field), "prompt is missing '{field}'");
        }
    }

    #[test]
    fn test_example_in_prompt_is_parseable() {
        let prompt = food_analysis_prompt();
        let start = prompt.find('{').unwrap();
        let end = prompt.rfind('}').unwrap();
        let items = super::super::parse(&prompt[start..=end]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "food name");
        assert_eq!(items[0].weight_grams, 150.0);
    }
}
