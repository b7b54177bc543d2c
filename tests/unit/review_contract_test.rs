// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use nobix::application::dto::review_request::ReviewRequestDto;
    use nobix::domain::models::review::{MediaType, ReviewMode};
    use nobix::domain::services::llm_service::Completion;
    use nobix::domain::services::review_schema::{review_schema, REQUIRED_FIELDS};
    use nobix::domain::services::review_service::shape_result;
    use serde_json::json;

    use crate::integration::helpers::fixtures::review_body;

    #[test]
    fn test_without_pro_mode_is_always_simple() {
        for mode in [None, Some("simple"), Some("detailed"), Some("DETAILED"), Some("bogus")] {
            for media_type in [MediaType::Book, MediaType::Manga, MediaType::Movie, MediaType::Tv] {
                let mut dto = ReviewRequestDto::new("Any title", media_type);
                dto.mode = mode.map(str::to_string);
                dto.pro = Some(false);

                let request = dto.into_request().unwrap();
                assert_eq!(request.effective_mode(), ReviewMode::Simple, "mode {:?}", mode);
            }
        }
    }

    #[test]
    fn test_pro_unlocks_only_requested_detailed_mode() {
        let mut dto = ReviewRequestDto::new("Dune", MediaType::Movie);
        dto.pro = Some(true);
        assert_eq!(dto.clone().into_request().unwrap().effective_mode(), ReviewMode::Simple);

        dto.mode = Some("detailed".to_string());
        assert_eq!(dto.into_request().unwrap().effective_mode(), ReviewMode::Detailed);
    }

    #[test]
    fn test_citations_absent_or_union() {
        let cases: [(Option<&str>, Vec<&str>, Vec<&str>); 4] = [
            (None, vec![], vec![]),
            (Some("https://body.example"), vec![], vec!["https://body.example"]),
            (None, vec!["https://meta.example"], vec!["https://meta.example"]),
            (
                Some("https://body.example"),
                vec!["https://meta.example"],
                vec!["https://body.example", "https://meta.example"],
            ),
        ];

        for (body_citation, metadata, expected) in cases {
            let mut body = review_body("");
            if let Some(url) = body_citation {
                body["citations"] = json!([url]);
            }
            let completion = Completion {
                content: Some(body.to_string()),
                citations: metadata.iter().map(|url| url.to_string()).collect(),
                ..Completion::default()
            };

            let review = shape_result(completion, false).unwrap();
            let serialized = serde_json::to_value(&review).unwrap();

            if expected.is_empty() {
                assert!(serialized.get("citations").is_none());
            } else {
                assert_eq!(serialized["citations"], json!(expected));
            }
        }
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        for field in REQUIRED_FIELDS {
            let mut body = review_body("");
            body.as_object_mut().unwrap().remove(field);
            let completion = Completion {
                content: Some(body.to_string()),
                ..Completion::default()
            };

            let err = shape_result(completion, false).unwrap_err();
            assert!(err.to_string().contains(field), "{} should be required", field);
        }
    }

    #[test]
    fn test_fixture_matches_schema_properties() {
        let schema = review_schema();
        let properties = schema["properties"].as_object().unwrap();

        for key in review_body("").as_object().unwrap().keys() {
            assert!(properties.contains_key(key), "{} is not declared", key);
        }
    }
}
