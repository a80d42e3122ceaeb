//! ポーリングスケジューラ
//!
//! ダッシュボードの固定間隔更新を精密制御
//! - タスクライフサイクル管理
//! - 同一IDの再登録は置換（旧タスクをキャンセル）
//! - アンマウント時の全タスクキャンセル
//! - 更新間隔はタスク種別ごとに固定

use dioxus::prelude::spawn;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// ポーリングタスクのID
pub type PollId = String;

/// ポーリングタスクの種類
#[derive(Debug, Clone, PartialEq)]
pub enum PollTaskType {
    /// ヘッダー時計の更新（1秒）
    ClockTick,
    /// ライブ指標・リスト更新（30秒）
    LiveRefresh,
    /// チャート統計更新（5分）
    StatsRefresh,
    /// カスタムタスク
    Custom(String),
}

/// ポーリングタスクの設定
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// 初回実行までの遅延
    pub delay: Duration,
    /// 繰り返し間隔（Noneで単発実行）
    pub interval: Option<Duration>,
    /// 最大実行回数（Noneで無制限）
    pub max_executions: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(0),
            interval: None,
            max_executions: Some(1),
        }
    }
}

impl PollConfig {
    /// ヘッダー時計用（1秒間隔）
    pub fn clock_tick() -> Self {
        Self::periodic(Duration::from_secs(1))
    }

    /// ライブ更新用（30秒間隔）
    pub fn live_refresh() -> Self {
        Self::periodic(Duration::from_secs(30))
    }

    /// 統計更新用（5分間隔）
    pub fn stats_refresh() -> Self {
        Self::periodic(Duration::from_secs(300))
    }

    fn periodic(interval: Duration) -> Self {
        Self {
            delay: interval,
            interval: Some(interval),
            max_executions: None,
        }
    }
}

/// ポーリングタスクの実行コンテキスト
#[derive(Debug, Clone)]
pub struct PollContext {
    pub task_id: PollId,
    pub task_type: PollTaskType,
    pub execution_count: u32,
    pub started_at: Instant,
}

/// ポーリングタスクの実行結果
#[derive(Debug)]
pub enum PollResult {
    /// 継続実行
    Continue,
    /// 完了（タスク終了）
    Complete,
    /// エラー（タスク停止）
    Error(String),
    /// キャンセル要求
    Cancel,
}

/// ポーリングタスクのハンドラー
///
/// Dioxusのシグナルを捕捉するためSend境界は付けない。
/// ハンドラーはspawnでUIタスクとして実行される。
pub type PollHandler = Box<dyn Fn(PollContext) -> PollResult + 'static>;

/// タスクの内部状態（キャンセル用の送信側のみ保持）
#[derive(Debug)]
struct PollTask {
    id: PollId,
    task_type: PollTaskType,
    cancel_sender: Option<oneshot::Sender<()>>,
}

/// ポーリングスケジューラ
#[derive(Debug)]
pub struct PollScheduler {
    /// アクティブなタスク
    active_tasks: Arc<Mutex<HashMap<PollId, PollTask>>>,
    /// 統計情報
    stats: Arc<Mutex<PollStats>>,
    /// スケジューラ開始時刻
    started_at: Instant,
}

/// ポーリング統計情報
#[derive(Debug, Clone)]
pub struct PollStats {
    pub total_tasks: u64,
    pub active_tasks: u64,
    pub completed_tasks: u64,
    pub cancelled_tasks: u64,
    pub error_tasks: u64,
    pub last_updated: Instant,
}

impl Default for PollStats {
    fn default() -> Self {
        Self {
            total_tasks: 0,
            active_tasks: 0,
            completed_tasks: 0,
            cancelled_tasks: 0,
            error_tasks: 0,
            last_updated: Instant::now(),
        }
    }
}

impl PollScheduler {
    pub fn new() -> Self {
        Self {
            active_tasks: Arc::new(Mutex::new(HashMap::new())),
            stats: Arc::new(Mutex::new(PollStats::default())),
            started_at: Instant::now(),
        }
    }

    /// ポーリングタスクを開始
    ///
    /// 同一IDの既存タスクはキャンセルしてから登録する。
    pub fn start_task<F>(
        &self,
        id: PollId,
        task_type: PollTaskType,
        config: PollConfig,
        handler: F,
    ) -> Result<(), String>
    where
        F: Fn(PollContext) -> PollResult + 'static,
    {
        // 既存タスクのキャンセル
        self.cancel_task(&id);

        let (cancel_sender, cancel_receiver) = oneshot::channel();

        let context = PollContext {
            task_id: id.clone(),
            task_type: task_type.clone(),
            execution_count: 0,
            started_at: Instant::now(),
        };

        let task = PollTask {
            id: id.clone(),
            task_type: task_type.clone(),
            cancel_sender: Some(cancel_sender),
        };

        // タスクを登録
        {
            let mut tasks = self.active_tasks.lock().unwrap();
            tasks.insert(id.clone(), task);
        }

        // 統計更新
        {
            let mut stats = self.stats.lock().unwrap();
            stats.total_tasks += 1;
            stats.active_tasks += 1;
            stats.last_updated = Instant::now();
        }

        // タスク実行を開始（UIタスクとしてspawn）
        let active_tasks = self.active_tasks.clone();
        let stats = self.stats.clone();
        let task_id = id.clone();

        spawn(async move {
            Self::execute_task(
                task_id,
                config,
                Box::new(handler),
                context,
                cancel_receiver,
                active_tasks,
                stats,
            )
            .await;
        });

        tracing::info!("⏱️ [POLL] Started task: {} ({:?})", id, task_type);
        Ok(())
    }

    /// タスクの実行処理
    async fn execute_task(
        task_id: PollId,
        config: PollConfig,
        handler: PollHandler,
        mut context: PollContext,
        mut cancel_receiver: oneshot::Receiver<()>,
        active_tasks: Arc<Mutex<HashMap<PollId, PollTask>>>,
        stats: Arc<Mutex<PollStats>>,
    ) {
        let mut execution_count = 0u32;

        // 初回遅延
        tokio::select! {
            _ = tokio::time::sleep(config.delay) => {},
            _ = &mut cancel_receiver => {
                Self::complete_task(&task_id, "cancelled", &active_tasks, &stats);
                return;
            }
        }

        loop {
            // 最大実行回数チェック
            if let Some(max) = config.max_executions {
                if execution_count >= max {
                    Self::complete_task(&task_id, "completed", &active_tasks, &stats);
                    return;
                }
            }

            // コンテキスト更新
            context.execution_count = execution_count;

            // ハンドラー実行
            let result = handler(context.clone());

            execution_count += 1;

            match result {
                PollResult::Continue => {
                    // 継続実行
                }
                PollResult::Complete => {
                    Self::complete_task(&task_id, "completed", &active_tasks, &stats);
                    return;
                }
                PollResult::Error(msg) => {
                    tracing::error!("⏱️ [POLL] Task error: {} - {}", task_id, msg);
                    Self::complete_task(&task_id, "error", &active_tasks, &stats);
                    return;
                }
                PollResult::Cancel => {
                    Self::complete_task(&task_id, "cancelled", &active_tasks, &stats);
                    return;
                }
            }

            // 繰り返し間隔の処理
            if let Some(interval) = config.interval {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {},
                    _ = &mut cancel_receiver => {
                        Self::complete_task(&task_id, "cancelled", &active_tasks, &stats);
                        return;
                    }
                }
            } else {
                // 単発実行の場合は終了
                Self::complete_task(&task_id, "completed", &active_tasks, &stats);
                return;
            }
        }
    }

    /// タスクの完了処理
    fn complete_task(
        task_id: &str,
        reason: &str,
        active_tasks: &Arc<Mutex<HashMap<PollId, PollTask>>>,
        stats: &Arc<Mutex<PollStats>>,
    ) {
        let removed = {
            let mut tasks = active_tasks.lock().unwrap();
            tasks.remove(task_id).is_some()
        };

        if removed {
            let mut stats = stats.lock().unwrap();
            stats.active_tasks = stats.active_tasks.saturating_sub(1);

            match reason {
                "completed" => stats.completed_tasks += 1,
                "cancelled" => stats.cancelled_tasks += 1,
                "error" => stats.error_tasks += 1,
                _ => {}
            }

            stats.last_updated = Instant::now();

            tracing::debug!("⏱️ [POLL] Task completed: {} ({})", task_id, reason);
        }
    }

    /// タスクをキャンセル
    pub fn cancel_task(&self, task_id: &str) -> bool {
        let sender = {
            let mut tasks = self.active_tasks.lock().unwrap();
            tasks
                .remove(task_id)
                .and_then(|mut task| task.cancel_sender.take())
        };

        if let Some(sender) = sender {
            let _ = sender.send(());
            tracing::info!("⏱️ [POLL] Cancelled task: {}", task_id);
            true
        } else {
            false
        }
    }

    /// 全タスクをキャンセル
    pub fn cancel_all_tasks(&self) -> u32 {
        let task_ids: Vec<String> = {
            let tasks = self.active_tasks.lock().unwrap();
            tasks.keys().cloned().collect()
        };

        let mut cancelled = 0;
        for task_id in task_ids {
            if self.cancel_task(&task_id) {
                cancelled += 1;
            }
        }

        if cancelled > 0 {
            tracing::info!("⏱️ [POLL] Cancelled all {} tasks", cancelled);
        }

        cancelled
    }

    /// アクティブなタスク一覧を取得
    pub fn get_active_tasks(&self) -> Vec<(PollId, PollTaskType)> {
        let tasks = self.active_tasks.lock().unwrap();
        tasks
            .values()
            .map(|task| (task.id.clone(), task.task_type.clone()))
            .collect()
    }

    /// 統計情報を取得
    pub fn get_stats(&self) -> PollStats {
        let stats = self.stats.lock().unwrap();
        stats.clone()
    }

    /// スケジューラの稼働時間を取得
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_POLL_SCHEDULER: OnceLock<Arc<PollScheduler>> = OnceLock::new();

/// グローバルポーリングスケジューラを取得
pub fn get_poll_scheduler() -> Arc<PollScheduler> {
    GLOBAL_POLL_SCHEDULER
        .get_or_init(|| {
            tracing::info!("⏱️ [POLL] Creating global poll scheduler");
            Arc::new(PollScheduler::new())
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_config_intervals() {
        let clock = PollConfig::clock_tick();
        assert_eq!(clock.interval, Some(Duration::from_secs(1)));
        assert_eq!(clock.max_executions, None);

        let live = PollConfig::live_refresh();
        assert_eq!(live.interval, Some(Duration::from_secs(30)));

        let stats = PollConfig::stats_refresh();
        assert_eq!(stats.interval, Some(Duration::from_secs(300)));
        assert_eq!(stats.delay, Duration::from_secs(300));
    }

    #[test]
    fn test_cancel_unknown_task_returns_false() {
        let scheduler = PollScheduler::new();
        assert!(!scheduler.cancel_task("no-such-task"));
        assert_eq!(scheduler.cancel_all_tasks(), 0);
    }

    #[test]
    fn test_initial_stats() {
        let scheduler = PollScheduler::new();
        let stats = scheduler.get_stats();
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.active_tasks, 0);
        assert!(scheduler.get_active_tasks().is_empty());
    }
}
