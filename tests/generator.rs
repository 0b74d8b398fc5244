//! Assignment properties checked through the public API on the in-memory store.

use customer_id::adapters::MemoryStore;
use customer_id::customer::{
    AssignmentStatus, CodeBook, CustomerAttributes, CustomerIdError, CustomerIdGenerator,
    CustomerRecord,
};
use customer_id::store::TableStore;

const CHAIN_INVOICED: &str = "0連鎖或相關企業的合開發票";
const CHAIN_SEPARATE: &str = "1連鎖或相關企業的不合開發票";

fn codes() -> CodeBook {
    CodeBook::new("達清關係企業")
}

#[tokio::test]
async fn head_office_example() {
    let backend = MemoryStore::default();
    let codes = codes();
    let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    let attrs = CustomerAttributes::new("1北投", CHAIN_INVOICED, "Acme")
        .with_extra_region("1本縣市")
        .with_branch_handling("00開立發票客編");
    let assignment = gen.generate(&attrs).await;

    assert_eq!(assignment.customer_id, "10001100");
    assert_eq!(assignment.status, AssignmentStatus::Created);
}

#[tokio::test]
async fn generating_twice_appends_once() {
    let backend = MemoryStore::default();
    let codes = codes();
    let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;
    let attrs = CustomerAttributes::new("2台南", "2單一客戶", "Initech");

    let first = gen.generate(&attrs).await;
    let second = gen.generate(&attrs).await;

    assert_eq!(first.customer_id, second.customer_id);
    assert_eq!(second.status, AssignmentStatus::Existing);
    assert_eq!(backend.snapshot().unwrap().len(), 1);
}

#[tokio::test]
async fn company_serial_is_shared_and_branch_serial_increases() {
    let backend = MemoryStore::default();
    let codes = codes();
    let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    // Another company takes the first serial of the pool.
    gen.generate(&CustomerAttributes::new("1北投", CHAIN_SEPARATE, "Globex").with_branch("Main"))
        .await;

    let mut ids = Vec::new();
    for branch in ["Beitou", "Shilin", "Tamsui"] {
        let attrs = CustomerAttributes::new("1北投", CHAIN_SEPARATE, "Acme").with_branch(branch);
        ids.push(gen.generate(&attrs).await.customer_id);
    }

    assert_eq!(ids, vec!["11002001", "11002002", "11002003"]);
    assert!(ids.iter().all(|id| &id[2..5] == "002"));
}

#[tokio::test]
async fn first_branch_serial_depends_on_branch_name() {
    let backend = MemoryStore::default();
    let codes = codes();
    let gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    let named = CustomerAttributes::new("3高雄", "8達清關係企業", "Hooli").with_branch("Kaohsiung");
    let unnamed = CustomerAttributes::new("3高雄", "8達清關係企業", "Hooli");

    assert_eq!(gen.preview(&named), "38001001");
    assert_eq!(gen.preview(&unnamed), "38001000");
}

#[tokio::test]
async fn preview_never_writes() {
    let backend = MemoryStore::with_records(Vec::new());
    let codes = codes();
    let gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    let id = gen.preview(&CustomerAttributes::new("1北投", "6機動", "Umbrella"));

    assert_eq!(id, "16000001");
    assert_eq!(backend.save_count(), 0);
    assert!(gen.table().is_empty());
}

#[tokio::test]
async fn opening_a_missing_table_creates_it() {
    let backend = MemoryStore::default();
    let codes = codes();
    let _gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    assert_eq!(backend.save_count(), 1);
    assert!(backend.snapshot().unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_missing_id_is_not_found() {
    let backend = MemoryStore::with_records(vec![CustomerRecord::assigned(
        &CustomerAttributes::new("1北投", "2單一客戶", "Acme"),
        "12000001",
    )]);
    let codes = codes();
    let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;

    let err = gen.delete("12000009").await.unwrap_err();

    assert!(matches!(err, CustomerIdError::NotFound { .. }));
    assert_eq!(err.status_code(), 404);
    assert_eq!(gen.table().len(), 1);
}

#[tokio::test]
async fn import_never_duplicates_ids() {
    let backend = MemoryStore::with_records(vec![CustomerRecord::assigned(
        &CustomerAttributes::new("1北投", "2單一客戶", "Acme"),
        "12000001",
    )]);
    let codes = codes();
    let mut gen = CustomerIdGenerator::open(TableStore::new(&backend), &codes).await;
    let file = "Region,Category,CompanyName,CustomerID\n\
                1北投,2單一客戶,Acme Copy,12000001\n\
                1北投,2單一客戶,Initech,12000002\n";

    gen.import(file.as_bytes()).await.unwrap();

    let stored = backend.snapshot().unwrap();
    let mut ids: Vec<&str> = stored.records().iter().map(|r| r.customer_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), stored.len());
    assert_eq!(stored.len(), 2);

    // Serial allocation continues after imported rows.
    let next = gen.preview(&CustomerAttributes::new("1北投", "2單一客戶", "Hooli"));
    assert_eq!(next, "12000003");
}
