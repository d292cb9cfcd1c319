use trade_ledger_data::{Database, NewTrade, Repositories, TradeSide};
use trade_ledger_worker::TradeProcessor;

async fn setup() -> (Repositories, TradeProcessor) {
    let db = Database::new_in_memory().await.expect("in-memory database");
    let repos = Repositories::new(db.pool());
    let processor = TradeProcessor::new(repos.queue.clone());
    (repos, processor)
}

#[tokio::test]
async fn test_single_buy_trade_aggregates_to_contract_profit() {
    let (repos, processor) = setup().await;

    let trade = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        1.0,
        1.0,
        2.0,
        TradeSide::Buy,
    );
    repos.queue.enqueue(&trade).await.unwrap();

    assert_eq!(processor.drain().await.unwrap(), 1);

    let stats = repos.stats.get("acc1").await.unwrap();
    assert_eq!(stats.trade_count, 1);
    assert!((stats.cumulative_profit - 100_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_buy_and_sell_net_out_per_account() {
    let (repos, processor) = setup().await;

    // +100000 buy
    let buy = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        1.0,
        1.0,
        2.0,
        TradeSide::Buy,
    );
    // sell into a rising price: -(2.0 - 1.5) * 0.5 * 100000 = -25000
    let sell = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        0.5,
        1.5,
        2.0,
        TradeSide::Sell,
    );
    repos.queue.enqueue(&buy).await.unwrap();
    repos.queue.enqueue(&sell).await.unwrap();

    assert_eq!(processor.drain().await.unwrap(), 2);

    let stats = repos.stats.get("acc1").await.unwrap();
    assert_eq!(stats.trade_count, 2);
    assert!((stats.cumulative_profit - 75_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_one_tick_drains_all_accounts() {
    let (repos, processor) = setup().await;

    for i in 0..5 {
        let trade = NewTrade::new(
            format!("acc{i}"),
            "ABCDEF".to_string(),
            1.0,
            1.0,
            2.0,
            TradeSide::Buy,
        );
        repos.queue.enqueue(&trade).await.unwrap();
    }

    assert_eq!(processor.drain().await.unwrap(), 5);
    assert!(repos.queue.fetch_pending().await.unwrap().is_empty());

    for i in 0..5 {
        let stats = repos.stats.get(&format!("acc{i}")).await.unwrap();
        assert_eq!(stats.trade_count, 1);
        assert!((stats.cumulative_profit - 100_000.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_repeated_drains_never_double_count() {
    let (repos, processor) = setup().await;

    let trade = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        1.0,
        1.0,
        2.0,
        TradeSide::Buy,
    );
    repos.queue.enqueue(&trade).await.unwrap();

    assert_eq!(processor.drain().await.unwrap(), 1);
    assert_eq!(processor.drain().await.unwrap(), 0);
    assert_eq!(processor.drain().await.unwrap(), 0);

    let stats = repos.stats.get("acc1").await.unwrap();
    assert_eq!(stats.trade_count, 1);
    assert!((stats.cumulative_profit - 100_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_producer_enqueue_between_drains_is_picked_up() {
    let (repos, processor) = setup().await;

    let first = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        1.0,
        1.0,
        2.0,
        TradeSide::Buy,
    );
    repos.queue.enqueue(&first).await.unwrap();
    assert_eq!(processor.drain().await.unwrap(), 1);

    let second = NewTrade::new(
        "acc1".to_string(),
        "ABCDEF".to_string(),
        2.0,
        1.0,
        2.0,
        TradeSide::Buy,
    );
    repos.queue.enqueue(&second).await.unwrap();
    assert_eq!(processor.drain().await.unwrap(), 1);

    let stats = repos.stats.get("acc1").await.unwrap();
    assert_eq!(stats.trade_count, 2);
    assert!((stats.cumulative_profit - 300_000.0).abs() < 1e-9);
}
