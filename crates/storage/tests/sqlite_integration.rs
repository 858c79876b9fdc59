use storage::repository::{
    CategoryRepository, NewQuestionRecord, QuestionRepository, Storage, StorageError,
};
use storage::seed::seed_defaults;
use storage::sqlite::SqliteRepository;
use trivia_core::model::{Category, CategoryId, QuestionId};

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

async fn with_categories(repo: &SqliteRepository) {
    for (id, name) in [(1, "Science"), (2, "Art")] {
        let category = Category::new(CategoryId::new(id), name).unwrap();
        repo.upsert_category(&category).await.unwrap();
    }
}

fn record(text: &str, category: u64, difficulty: u8) -> NewQuestionRecord {
    NewQuestionRecord {
        question: text.to_string(),
        answer: "answer".to_string(),
        category: CategoryId::new(category),
        difficulty,
    }
}

#[tokio::test]
async fn sqlite_roundtrip_lists_by_id_and_category() {
    let repo = connect("memdb_roundtrip").await;
    with_categories(&repo).await;

    let a = repo
        .insert_new_question(record("Why is the Sun hot?", 1, 0))
        .await
        .unwrap();
    let b = repo
        .insert_new_question(record("Who painted the Mona Lisa?", 2, 3))
        .await
        .unwrap();
    let c = repo
        .insert_new_question(record("What is H2O?", 1, 1))
        .await
        .unwrap();

    let all = repo.list_questions().await.unwrap();
    let ids: Vec<_> = all.iter().map(|q| q.id()).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert_eq!(all[0].difficulty().value(), 0);

    let science = repo.list_by_category(CategoryId::new(1)).await.unwrap();
    let ids: Vec<_> = science.iter().map(|q| q.id()).collect();
    assert_eq!(ids, vec![a, c]);

    let fetched = repo.get_question(b).await.unwrap().expect("present");
    assert_eq!(fetched.question(), "Who painted the Mona Lisa?");
    assert_eq!(fetched.category(), CategoryId::new(2));
}

#[tokio::test]
async fn sqlite_search_is_case_insensitive_and_literal() {
    let repo = connect("memdb_search").await;
    with_categories(&repo).await;

    repo.insert_new_question(record("Why is the Sun hot?", 1, 1))
        .await
        .unwrap();
    repo.insert_new_question(record("Capital of France", 1, 1))
        .await
        .unwrap();
    repo.insert_new_question(record("Is 100% of the moon lit?", 1, 1))
        .await
        .unwrap();

    let lower = repo.search_questions("sun").await.unwrap();
    let upper = repo.search_questions("SUN").await.unwrap();
    assert_eq!(lower.len(), 1);
    assert_eq!(lower, upper);

    let percent = repo.search_questions("%").await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].question(), "Is 100% of the moon lit?");

    assert!(repo.search_questions("volcano").await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_search_folds_non_ascii_case_like_core_filter() {
    let repo = connect("memdb_search_unicode").await;
    with_categories(&repo).await;

    repo.insert_new_question(record("Who wrote Les Misérables?", 2, 3))
        .await
        .unwrap();
    repo.insert_new_question(record("Where is Zürich?", 1, 2))
        .await
        .unwrap();

    let all = repo.list_questions().await.unwrap();
    let expected = trivia_core::search("MISÉRABLES", all);
    let found = repo.search_questions("MISÉRABLES").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found, expected);

    let found = repo.search_questions("zÜRICH").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].question(), "Where is Zürich?");
}

#[tokio::test]
async fn sqlite_rejects_question_for_unknown_category() {
    let repo = connect("memdb_fk").await;
    with_categories(&repo).await;

    let err = repo
        .insert_new_question(record("Orphan?", 42, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Constraint(_)), "{err:?}");
}

#[tokio::test]
async fn sqlite_delete_reports_missing_rows() {
    let repo = connect("memdb_delete").await;
    with_categories(&repo).await;

    let id = repo
        .insert_new_question(record("Short lived?", 2, 2))
        .await
        .unwrap();
    repo.delete_question(id).await.unwrap();
    assert!(repo.get_question(id).await.unwrap().is_none());

    let err = repo.delete_question(id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    let err = repo
        .delete_question(QuestionId::new(9_999))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_categories_upsert_and_list_in_order() {
    let repo = connect("memdb_categories").await;
    with_categories(&repo).await;

    let renamed = Category::new(CategoryId::new(2), "Fine Art").unwrap();
    repo.upsert_category(&renamed).await.unwrap();

    let categories = repo.list_categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name(), "Science");
    assert_eq!(categories[1].name(), "Fine Art");
}

#[tokio::test]
async fn sqlite_storage_seeds_defaults_once() {
    let storage = Storage::sqlite("sqlite:file:memdb_seed?mode=memory&cache=shared")
        .await
        .expect("storage");

    let first = seed_defaults(&storage).await.unwrap();
    assert!(first.questions > 0);
    let second = seed_defaults(&storage).await.unwrap();
    assert_eq!(second.questions, 0);

    let total = storage.questions.list_questions().await.unwrap().len();
    assert_eq!(total, first.questions);
}
