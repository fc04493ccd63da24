use proptest::prelude::*;
use reception_core::resolver::score;
use reception_core::utterance::normalize;
use reception_core::{CategoryOrder, MatchResult, MemoryStore, Record, Resolver, Utterance};

fn catch_all_store() -> MemoryStore {
    MemoryStore::new()
        .with_category("finance_faqs", vec![Record::new("a", "finance").with_keywords(["e", " "])])
        .with_category("general_questions", vec![Record::new("", "general").with_keywords(["a", "e", "i"])])
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".{0,80}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn whitespace_only_is_not_found(s in "[ \t\r\n]{0,20}") {
        let resolver = Resolver::new(CategoryOrder::default());
        prop_assert_eq!(resolver.resolve(&Utterance::new(&s), &catch_all_store()), MatchResult::NotFound);
    }

    #[test]
    fn earlier_category_always_wins(words in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let utterance = words.join(" ");
        let first = Record::new("zzzz-never", "first").with_keywords([words[0].clone()]);
        let second = Record::new(utterance.clone(), "second").with_keywords(words.clone());
        let store = MemoryStore::new()
            .with_category("finance_faqs", vec![first])
            .with_category("general_questions", vec![second]);
        let order = CategoryOrder::new(["finance_faqs", "general_questions"]).unwrap();

        let result = Resolver::new(order).resolve(&Utterance::new(&utterance), &store);
        prop_assert_eq!(result, MatchResult::Found("first".to_string()));
    }

    #[test]
    fn score_is_even_without_question_match(words in proptest::collection::vec("[a-z]{1,6}", 0..8), text in "[a-z ]{1,40}") {
        let record = Record::new("", "answer").with_keywords(words);
        prop_assert_eq!(score(&record, &text) % 2, 0);
    }
}
