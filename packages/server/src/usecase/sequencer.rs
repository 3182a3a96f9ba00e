//! UseCase: 通知順序の制御
//!
//! Repository のロックは状態変更ごとに解放されるため、そのままでは
//! 並行した 2 つの操作の通知が、状態変更とは逆の順序で届くことがあります。
//! 各ユースケースは「状態変更 + 通知」の区間をこのガードの内側で実行し、
//! 状態変更の順序と通知の順序を一致させます。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// 状態変更と通知をひとまとまりにするための順序ガード
///
/// `Clone` したものは同じガードを共有します。
#[derive(Clone, Default)]
pub struct EventSequencer {
    turn: Arc<Mutex<()>>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 区間に入る。ガードを drop するまで他のユースケースは待機する
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.turn.lock().await
    }
}
