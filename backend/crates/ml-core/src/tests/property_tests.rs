use crate::{htmlify_body, is_email_valid};

use proptest::prelude::*;

proptest! {
    #[test]
    fn given_simple_address_when_validated_then_accepted(
        local in "[a-z0-9._+-]{1,20}",
        domain in "[a-z0-9-]{1,20}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(is_email_valid(&email));
    }

    #[test]
    fn given_string_without_at_when_validated_then_rejected(input in "[a-zA-Z0-9.]{0,40}") {
        prop_assert!(!is_email_valid(&input));
    }

    #[test]
    fn given_any_body_when_htmlified_then_wrapped_in_paragraph(body in ".{0,200}") {
        let html = htmlify_body(&body);
        prop_assert!(html.starts_with("<p>"));
        prop_assert!(html.ends_with("</p>"));
    }

    #[test]
    fn given_lines_when_htmlified_then_one_paragraph_per_non_blank_line(
        lines in proptest::collection::vec("[a-z]{0,8}", 0..10)
    ) {
        let body = lines.join("\n");
        let expected = lines.iter().filter(|l| !l.is_empty()).count().max(1);
        prop_assert_eq!(htmlify_body(&body).matches("<p>").count(), expected);
    }
}
