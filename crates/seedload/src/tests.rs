use crate::{
    Error, MemoryStore, MemoryTransfer, Reporter, ReportSink, RunOptions, RunSummary, Scheduler,
    Store, StoreError, Table, Transfer,
};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
}

fn options(rows: u64, chunk: u64) -> RunOptions {
    RunOptions::new(rows, chunk).with_anchor(anchor())
}

fn reporter(dir: &TempDir) -> Reporter {
    Reporter::new(ReportSink::new(dir.path().join("reports/copy_benchmarks.csv")))
}

async fn run<S: Store>(
    store: &mut S,
    reporter: &mut Reporter,
    options: RunOptions,
) -> crate::Result<RunSummary> {
    Scheduler::new(options)?.run(store, reporter).await
}

async fn counts<S: Store>(store: &mut S) -> [u64; 3] {
    let mut counts = [0; 3];
    for (count, table) in counts.iter_mut().zip(Table::LOAD_ORDER) {
        *count = store.count(table).await.unwrap();
    }
    counts
}

/// Wraps a [`MemoryStore`], logging every stream it receives and optionally
/// failing one table's stream in one batch, or every row count.
#[derive(Default)]
struct Recording {
    inner: MemoryStore,
    streams: Vec<(usize, Table, Vec<u8>)>,
    fail: Option<(usize, Table)>,
    fail_counts: bool,
    begun: usize,
}

impl Recording {
    fn failing(batch: usize, table: Table) -> Self {
        Self {
            fail: Some((batch, table)),
            ..Self::default()
        }
    }

    fn without_counts() -> Self {
        Self {
            fail_counts: true,
            ..Self::default()
        }
    }

    /// Concatenation of every stream sent to `table`, in arrival order.
    fn bytes(&self, table: Table) -> Vec<u8> {
        self.streams
            .iter()
            .filter(|(_, t, _)| *t == table)
            .flat_map(|(_, _, rows)| rows.iter().copied())
            .collect()
    }
}

struct RecordingTx<'a> {
    tx: MemoryTransfer<'a>,
    streams: &'a mut Vec<(usize, Table, Vec<u8>)>,
    batch: usize,
    fail: Option<Table>,
}

impl Store for Recording {
    type Tx<'a> = RecordingTx<'a>;

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn reset(&mut self) -> Result<(), StoreError> {
        self.streams.clear();
        self.begun = 0;
        self.inner.reset().await
    }

    async fn begin(&mut self) -> Result<RecordingTx<'_>, StoreError> {
        self.begun += 1;
        let batch = self.begun;
        let fail = self
            .fail
            .filter(|(failing, _)| *failing == batch)
            .map(|(_, table)| table);
        Ok(RecordingTx {
            tx: self.inner.begin().await?,
            streams: &mut self.streams,
            batch,
            fail,
        })
    }

    async fn count(&mut self, table: Table) -> Result<u64, StoreError> {
        if self.fail_counts {
            return Err(StoreError::Malformed {
                table,
                reason: "count unavailable".to_owned(),
            });
        }
        self.inner.count(table).await
    }
}

impl Transfer for RecordingTx<'_> {
    async fn copy_in(&mut self, table: Table, rows: &[u8]) -> Result<u64, StoreError> {
        self.streams.push((self.batch, table, rows.to_vec()));
        if self.fail == Some(table) {
            return Err(StoreError::Constraint {
                table,
                reason: "injected failure".to_owned(),
            });
        }
        self.tx.copy_in(table, rows).await
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await
    }
}

#[tokio::test]
async fn every_table_holds_exactly_the_requested_rows() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();

    let summary = run(&mut store, &mut reporter(&dir), options(25, 7)).await.unwrap();

    assert_eq!(summary.rows_loaded, 25);
    assert_eq!(summary.batches, 4);
    assert_eq!(counts(&mut store).await, [25, 25, 25]);
}

#[tokio::test]
async fn every_person_and_relationship_resolves() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();
    run(&mut store, &mut reporter(&dir), options(40, 6)).await.unwrap();

    for person in 1..=40 {
        let location = store.location_of(person).unwrap();
        assert!(store.contains(Table::Location, location));
    }

    let mut persons: Vec<_> = store.relationship_persons().collect();
    persons.sort_unstable();
    assert_eq!(persons, (1..=40).collect::<Vec<_>>());
}

#[tokio::test]
async fn output_does_not_depend_on_batch_size() {
    let dir = TempDir::new().unwrap();
    let mut small = Recording::default();
    let mut large = Recording::default();

    run(&mut small, &mut reporter(&dir), options(30, 4)).await.unwrap();
    run(&mut large, &mut reporter(&dir), options(30, 30)).await.unwrap();

    for table in Table::LOAD_ORDER {
        assert_eq!(small.bytes(table), large.bytes(table), "{table}");
    }
}

#[tokio::test]
async fn same_seed_reproduces_and_other_seed_diverges() {
    let dir = TempDir::new().unwrap();
    let mut a = Recording::default();
    let mut b = Recording::default();
    let mut c = Recording::default();

    run(&mut a, &mut reporter(&dir), options(12, 5)).await.unwrap();
    run(&mut b, &mut reporter(&dir), options(12, 5)).await.unwrap();
    run(&mut c, &mut reporter(&dir), options(12, 5).with_seed(7)).await.unwrap();

    assert_eq!(a.bytes(Table::Person), b.bytes(Table::Person));
    assert_ne!(a.bytes(Table::Person), c.bytes(Table::Person));
}

#[tokio::test]
async fn rerunning_replaces_rather_than_appends() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();

    run(&mut store, &mut reporter(&dir), options(15, 4)).await.unwrap();
    run(&mut store, &mut reporter(&dir), options(15, 4)).await.unwrap();

    assert_eq!(counts(&mut store).await, [15, 15, 15]);
}

#[tokio::test]
async fn last_batch_carries_the_remainder() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();
    let mut reporter = reporter(&dir);

    run(&mut store, &mut reporter, options(10, 4)).await.unwrap();

    let progress = reporter.progress();
    let sizes: Vec<_> = progress.iter().map(|p| p.batch_size).collect();
    let done: Vec<_> = progress.iter().map(|p| p.rows_done).collect();
    let batches: Vec<_> = progress.iter().map(|p| p.batch).collect();
    assert_eq!(sizes, vec![4, 4, 2]);
    assert_eq!(done, vec![4, 8, 10]);
    assert_eq!(batches, vec![1, 2, 3]);
    assert!(progress.iter().all(|p| p.requested == 10));
}

#[tokio::test]
async fn failed_batch_keeps_earlier_batches_and_nothing_of_itself() {
    let dir = TempDir::new().unwrap();
    let mut store = Recording::failing(2, Table::Relationship);
    let mut reporter = reporter(&dir);

    let err = run(&mut store, &mut reporter, options(10, 4)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Batch {
            batch: 2,
            first_row: 5,
            end_row: 9,
            source: StoreError::Constraint {
                table: Table::Relationship,
                ..
            },
        }
    ));
    assert_eq!(counts(&mut store).await, [4, 4, 4]);
    assert_eq!(reporter.progress().len(), 1);

    // Batch 3 was never attempted.
    assert!(store.streams.iter().all(|(batch, _, _)| *batch <= 2));

    let report = std::fs::read_to_string(reporter.sink().path()).unwrap();
    assert!(report.lines().nth(1).unwrap().contains(",memory,copy_stream,10,4,4,4,"));
}

#[tokio::test]
async fn streams_follow_parent_before_child_order() {
    let dir = TempDir::new().unwrap();
    let mut store = Recording::default();
    run(&mut store, &mut reporter(&dir), options(9, 4)).await.unwrap();

    let order: Vec<_> = store
        .streams
        .iter()
        .map(|(batch, table, _)| (*batch, *table))
        .collect();
    let expected: Vec<_> = (1..=3)
        .flat_map(|batch| Table::LOAD_ORDER.map(|table| (batch, table)))
        .collect();
    assert_eq!(order, expected);
}

#[tokio::test]
async fn report_gains_one_row_per_run() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();

    run(&mut store, &mut reporter(&dir), options(8, 3)).await.unwrap();
    let summary = run(&mut store, &mut reporter(&dir), options(5, 3)).await.unwrap();

    let report = std::fs::read_to_string(dir.path().join("reports/copy_benchmarks.csv")).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ts,engine,method,n_req,addr,users,rels,gen_s,copy_s,total_s");
    assert!(lines[1].contains(",memory,copy_stream,8,8,8,8,"));
    assert!(lines[2].contains(",memory,copy_stream,5,5,5,5,"));

    let row = summary.report.unwrap();
    assert_eq!((row.addr, row.users, row.rels), (5, 5, 5));
    assert!(row.total_s >= row.gen_s.max(row.copy_s) - 0.05);
}

#[tokio::test]
async fn unwritable_report_does_not_fail_the_load() {
    let dir = TempDir::new().unwrap();
    let mut store = MemoryStore::new();
    // A directory where the report file should be.
    let mut reporter = Reporter::new(ReportSink::new(dir.path()));

    let summary = run(&mut store, &mut reporter, options(10, 4)).await.unwrap();

    assert!(summary.report.is_none());
    assert_eq!(summary.rows_loaded, 10);
    assert_eq!(summary.batches, 3);
    assert_eq!(counts(&mut store).await, [10, 10, 10]);
}

#[tokio::test]
async fn unreadable_counts_do_not_fail_the_load() {
    let dir = TempDir::new().unwrap();
    let mut store = Recording::without_counts();
    let mut reporter = reporter(&dir);

    let summary = run(&mut store, &mut reporter, options(10, 4)).await.unwrap();

    assert!(summary.report.is_none());
    assert_eq!(summary.rows_loaded, 10);
    assert_eq!(counts(&mut store.inner).await, [10, 10, 10]);
    assert!(!reporter.sink().path().exists());
}

#[tokio::test]
async fn failed_report_keeps_the_batch_error() {
    let dir = TempDir::new().unwrap();
    let mut store = Recording::failing(2, Table::Person);
    let mut reporter = Reporter::new(ReportSink::new(dir.path()));

    let err = run(&mut store, &mut reporter, options(10, 4)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Batch {
            batch: 2,
            source: StoreError::Constraint {
                table: Table::Person,
                ..
            },
            ..
        }
    ));
    assert_eq!(counts(&mut store).await, [4, 4, 4]);
}

#[tokio::test]
async fn zero_rows_runs_no_batches() {
    let dir = TempDir::new().unwrap();
    let mut store = Recording::default();
    let mut reporter = reporter(&dir);

    let summary = run(&mut store, &mut reporter, options(0, 4)).await.unwrap();

    assert_eq!(summary.rows_loaded, 0);
    assert_eq!(summary.batches, 0);
    assert!(store.streams.is_empty());
    assert_eq!(counts(&mut store).await, [0, 0, 0]);
    assert!(reporter.sink().path().exists());
}

#[test]
fn zero_chunk_is_rejected() {
    assert!(matches!(
        Scheduler::new(options(10, 0)),
        Err(Error::InvalidConfig { .. })
    ));
}

#[test]
fn batch_plan_counts_partial_batch() {
    let plan = crate::BatchPlan::new(3_000_000, 100_000).unwrap();
    assert_eq!(plan.batches(), 30);
    assert_eq!(crate::BatchPlan::new(10, 4).unwrap().batches(), 3);
    assert_eq!(crate::BatchPlan::new(0, 4).unwrap().count(), 0);
}
