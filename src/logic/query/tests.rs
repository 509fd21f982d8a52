use super::*;
use crate::logic::testutil::{ddos_fixture, row};
use proptest::prelude::*;

fn rows(n: u64) -> Vec<PredictionRow> {
    (0..n).map(|i| row(i, "BENIGN", false)).collect()
}

fn criteria_for_class(label: &str) -> QueryCriteria {
    QueryCriteria {
        class_filter: ClassFilter::Class(TrafficClass::from_label(label)),
        ..Default::default()
    }
}

#[test]
fn test_class_filter_counts() {
    let fixture = ddos_fixture();
    assert_eq!(query(&fixture, &criteria_for_class("DDoS")).total_matched, 10);
    assert_eq!(query(&fixture, &criteria_for_class("Bot")).total_matched, 0);
}

#[test]
fn test_anomaly_filter_counts() {
    let fixture = ddos_fixture();
    let criteria = QueryCriteria { anomaly_only: true, ..Default::default() };
    let page = query(&fixture, &criteria);
    assert_eq!(page.total_matched, 3);
    assert!(page.rows.iter().all(|r| r.is_anomaly));
}

#[test]
fn test_clauses_are_anded() {
    let fixture = ddos_fixture();
    let criteria = QueryCriteria {
        anomaly_only: true,
        ..criteria_for_class("DDoS")
    };
    assert_eq!(query(&fixture, &criteria).total_matched, 0);
}

#[test]
fn test_search_is_case_insensitive_on_class() {
    let fixture = ddos_fixture();
    let criteria = QueryCriteria { search_term: "ddos".to_string(), ..Default::default() };
    assert_eq!(query(&fixture, &criteria).total_matched, 10);

    let criteria = QueryCriteria { search_term: "BeNiGn".to_string(), ..Default::default() };
    assert_eq!(query(&fixture, &criteria).total_matched, 90);
}

#[test]
fn test_search_matches_partial_row_id() {
    let fixture = ddos_fixture();
    // 7, 17, 27, ..., 97 and 70..=79
    let criteria = QueryCriteria { search_term: "7".to_string(), ..Default::default() };
    let page = query(&fixture, &criteria);
    assert_eq!(page.total_matched, 19);
    assert_eq!(page.rows[0].row_id, 7);
}

#[test]
fn test_empty_result_has_one_page() {
    let criteria = QueryCriteria { search_term: "no such class".to_string(), ..Default::default() };
    let page = query(&ddos_fixture(), &criteria);
    assert_eq!(page.total_matched, 0);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.page, 1);
    assert!(page.rows.is_empty());
    assert_eq!(page.first_index(), 0);
    assert_eq!(page.last_index(), 0);
    assert!(!page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn test_pagination_boundary() {
    let data = rows(26);
    let first = query(&data, &QueryCriteria::default());
    assert_eq!(first.page_count, 2);
    assert_eq!(first.rows.len(), 25);
    assert!(first.has_next());

    let second = query(&data, &QueryCriteria { page: 2, ..Default::default() });
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.rows[0].row_id, 25);
    assert_eq!(second.first_index(), 26);
    assert_eq!(second.last_index(), 26);
    assert!(second.has_previous());
    assert!(!second.has_next());
}

#[test]
fn test_exact_multiple_of_page_size() {
    let page = query(&rows(50), &QueryCriteria { page: 2, ..Default::default() });
    assert_eq!(page.page_count, 2);
    assert_eq!(page.rows.len(), 25);
}

#[test]
fn test_page_is_clamped() {
    let data = rows(30);
    let beyond = query(&data, &QueryCriteria { page: 9, ..Default::default() });
    assert_eq!(beyond.page, 2);
    assert_eq!(beyond.rows.len(), 5);

    let zero = query(&data, &QueryCriteria { page: 0, ..Default::default() });
    assert_eq!(zero.page, 1);
    assert_eq!(zero.rows[0].row_id, 0);
}

#[test]
fn test_order_is_preserved() {
    let mut data = ddos_fixture();
    data[10].confidence = 0.1;
    data[20].confidence = 0.99;
    let page = query(&data, &criteria_for_class("DDoS"));
    let ids: Vec<u64> = page.rows.iter().map(|r| r.row_id).collect();
    assert_eq!(ids, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
}

#[test]
fn test_table_state_clamps_after_filter_change() {
    let data = ddos_fixture();
    let mut table = TableState::new();

    table.go_to_page(4);
    assert_eq!(table.refresh(&data).page, 4);

    table.set_class_filter(ClassFilter::Class(TrafficClass::DDoS));
    let page = table.refresh(&data);
    assert_eq!(page.page, 1);
    assert_eq!(table.criteria().page, 1);

    table.set_class_filter(ClassFilter::All);
    table.next_page();
    table.next_page();
    assert_eq!(table.refresh(&data).page, 3);

    table.previous_page();
    assert_eq!(table.refresh(&data).page, 2);
}

#[test]
fn test_table_state_resets_on_new_results() {
    let mut table = TableState::new();
    table.sync_generation(1);
    table.go_to_page(3);
    table.sync_generation(1);
    assert_eq!(table.criteria().page, 3);

    table.sync_generation(2);
    assert_eq!(table.criteria().page, 1);
}

#[test]
fn test_filter_options() {
    let options = class_filter_options();
    assert_eq!(options.len(), 16);
    assert_eq!(options[0].value, "ALL");
    assert_eq!(options[1].label, "0: BENIGN");
    assert_eq!(options[15].label, "14: Web Attack - XSS");
}

#[test]
fn test_class_filter_from_wire_value() {
    let filter: ClassFilter = serde_json::from_str("\"ALL\"").unwrap();
    assert_eq!(filter, ClassFilter::All);
    let filter: ClassFilter = serde_json::from_str("\"DoS Hulk\"").unwrap();
    assert_eq!(filter, ClassFilter::Class(TrafficClass::DosHulk));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_query_is_idempotent(
        entries in proptest::collection::vec((0usize..15, any::<bool>(), 0.0f64..=1.0), 0..120),
        search in "[a-zA-Z0-9 ]{0,3}",
        class_idx in proptest::option::of(0usize..15),
        anomaly_only in any::<bool>(),
        page in 0usize..8,
    ) {
        let data: Vec<PredictionRow> = entries
            .iter()
            .enumerate()
            .map(|(i, (idx, anomaly, conf))| {
                PredictionRow::new(i as u64, TrafficClass::KNOWN[*idx].clone(), *conf, *anomaly)
            })
            .collect();

        let criteria = QueryCriteria {
            search_term: search,
            class_filter: class_idx
                .map(|i| ClassFilter::Class(TrafficClass::KNOWN[i].clone()))
                .unwrap_or_default(),
            anomaly_only,
            page,
        };

        let first = query(&data, &criteria);
        let second = query(&data, &criteria);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.page >= 1 && first.page <= first.page_count);
        prop_assert!(first.rows.len() <= PAGE_SIZE);
    }
}
