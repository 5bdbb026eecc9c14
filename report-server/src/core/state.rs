use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::OrderRepository;
use crate::reports::{OrderStore, ReportService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝 (`SqlitePool` / `Arc`)，可以直接作为 axum State。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | reports | ReportService | 销售报表服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub reports: ReportService,
}

impl ServerState {
    /// 打开数据库、执行迁移并装配服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 使用已有的数据库装配服务 (测试时共享同一个内存库)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let store: Arc<dyn OrderStore> = Arc::new(OrderRepository::new(db.pool.clone()));
        Self::with_store(config, db, store)
    }

    /// 使用自定义订单存储装配服务
    pub fn with_store(config: Config, db: DbService, store: Arc<dyn OrderStore>) -> Self {
        let reports = ReportService::new(store, config.timezone, config.epoch_floor);
        tracing::info!(
            timezone = %config.timezone,
            epoch_floor = %config.epoch_floor,
            "Report service ready"
        );
        Self { config, db, reports }
    }

    /// 订单仓库 (写入/导入工具使用)
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.pool.clone())
    }
}
