use std::time::Duration;

use hearth_core::TaskHandle;

#[tokio::test(flavor = "multi_thread")]
async fn stop_waits_for_graceful_exit() {
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let _ = stop_rx.await;
        let _ = done_tx.send(());
    });

    let handle = TaskHandle::new(task, stop_tx);
    handle.stop().await;

    tokio::time::timeout(Duration::from_millis(100), done_rx)
        .await
        .expect("task did not complete after stop()")
        .expect("done signal dropped");
}

#[tokio::test(flavor = "multi_thread")]
async fn drop_aborts_running_task() {
    let (stop_tx, _stop_rx) = tokio::sync::oneshot::channel::<()>();
    let (alive_tx, mut alive_rx) = tokio::sync::mpsc::channel::<()>(1);

    let task = tokio::spawn(async move {
        loop {
            if alive_tx.send(()).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    let handle = TaskHandle::new(task, stop_tx);
    alive_rx.recv().await.expect("task started");
    drop(handle);

    tokio::time::sleep(Duration::from_millis(30)).await;
    while alive_rx.try_recv().is_ok() {}
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(alive_rx.try_recv().is_err());
}
