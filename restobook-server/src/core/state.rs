use parking_lot::RwLock;
use std::sync::Arc;

use crate::auth::StaffAccount;
use crate::core::Config;
use crate::reservations::ReservationManager;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | reservations | Arc<ReservationManager> | 预订簿 (内部单锁) |
/// | staff | Arc<RwLock<StaffAccount>> | 员工账号 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 预订管理器
    pub reservations: Arc<ReservationManager>,
    /// 员工账号 (可改名)
    pub staff: Arc<RwLock<StaffAccount>>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 方法代替
    pub fn new(config: Config, reservations: ReservationManager, staff: StaffAccount) -> Self {
        Self {
            config,
            reservations: Arc::new(reservations),
            staff: Arc::new(RwLock::new(staff)),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 预订簿 (work_dir/DATA_FILE，读取失败时为空)
    /// 3. 员工账号
    pub fn initialize(config: &Config) -> std::io::Result<Self> {
        config.ensure_work_dir_structure()?;

        let reservations = ReservationManager::open(
            config.data_file_path(),
            config.timezone,
            config.table_selection,
        );
        let staff = StaffAccount::new(&config.staff_username, &config.staff_password);

        Ok(Self::new(config.clone(), reservations, staff))
    }
}
