use crate::model::Question;

/// Keep the questions whose text contains `term`, ignoring case.
///
/// Input order is preserved. An empty term matches everything; callers are
/// expected to treat blank input as "no search" before getting here.
#[must_use]
pub fn search(term: &str, questions: impl IntoIterator<Item = Question>) -> Vec<Question> {
    let needle = term.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.question().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, Difficulty, QuestionId};

    fn question(id: u64, text: &str) -> Question {
        Question::from_persisted(
            QuestionId::new(id),
            text.to_string(),
            "answer".to_string(),
            CategoryId::new(1),
            Difficulty::new(1),
        )
        .unwrap()
    }

    fn bank() -> Vec<Question> {
        vec![
            question(1, "Why is the sun hot?"),
            question(2, "Capital of France"),
        ]
    }

    #[test]
    fn matches_substring() {
        let found = search("sun", bank());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), QuestionId::new(1));
    }

    #[test]
    fn match_ignores_case() {
        let lower = search("sun", bank());
        let upper = search("SUN", bank());
        assert_eq!(lower, upper);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("volcano", bank()).is_empty());
    }

    #[test]
    fn empty_term_matches_all_in_order() {
        let found = search("", bank());
        let ids: Vec<_> = found.iter().map(Question::id).collect();
        assert_eq!(ids, vec![QuestionId::new(1), QuestionId::new(2)]);
    }

    #[test]
    fn does_not_search_answers() {
        assert!(search("answer", bank()).is_empty());
    }
}
