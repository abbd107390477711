use pretty_assertions::assert_eq;

use nutriscan::models::{FoodItem, DEFAULT_CONFIDENCE, DEFAULT_METHOD, DEFAULT_WEIGHT_GRAMS};
use nutriscan::recognition::parse;

#[test]
fn typical_model_reply() {
    let raw = r#"Here is what I see on the plate:

```json
{
  "foods": [
    {"en_name": "grilled chicken breast", "estimated_weight_grams": 180, "confidence": 0.92, "method": "grilled"},
    {"en_name": "steamed rice", "estimated_weight_grams": "about 150g", "confidence": 0.85, "method": "steamed"},
    {"en_name": "broccoli", "estimated_weight_grams": 60, "confidence": 0.7, "method": "boiled"}
  ]
}
```"#;

    assert_eq!(
        parse(raw),
        vec![
            FoodItem::new("grilled chicken breast", 180.0, 0.92, "grilled"),
            FoodItem::new("steamed rice", 150.0, 0.85, "steamed"),
            FoodItem::new("broccoli", 60.0, 0.7, "boiled"),
        ]
    );
}

#[test]
fn text_reply_keeps_order_and_defaults() {
    let raw = "1. Food: Fried egg\n   Weight: 50 g\n2. Food: Toast\n3. Food: Orange juice\n   Weight: 250ml";

    let items = parse(raw);
    assert_eq!(
        items,
        vec![
            FoodItem::named("Fried egg", 50.0),
            FoodItem::named("Toast", DEFAULT_WEIGHT_GRAMS),
            FoodItem::named("Orange juice", 250.0),
        ]
    );
    assert!(items
        .iter()
        .all(|i| i.confidence == DEFAULT_CONFIDENCE && i.method == DEFAULT_METHOD));
}

#[test]
fn refusal_yields_no_items() {
    assert!(parse("Sorry, I cannot analyze this image.").is_empty());
}
