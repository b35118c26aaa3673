// ==========================================
// 季度奖金面板 - 面板 API
// ==========================================
// 职责: 持有只读数据（员工数据集 + 漏报指标表），按请求完整重算面板
// 流程: 原始数据 → 筛选引擎 → 扣减计算（逐行）→ 汇总 + 卡片
// 并发: 数据加载后不再修改，可通过 Arc 在请求间共享，无需加锁
// ==========================================

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::dto::{EmployeeCard, FilterOptions, PanelRequest, PanelView, CARD_COLUMNS};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::employee::EmployeeRecord;
use crate::domain::indicator::MissedIndicatorTable;
use crate::domain::types::{Month, Period, ALL_SENTINEL};
use crate::engine::{AdjustmentCalculator, FilterEngine, SummaryEngine};
use crate::importer::DatasetLoader;

/// 解析周期标签（"Trimestre" / "Janeiro" / "Fevereiro" / "Março"）
pub fn parse_period(label: &str) -> ApiResult<Period> {
    label.parse::<Period>().map_err(ApiError::InvalidInput)
}

// ==========================================
// PanelData - 只读数据
// ==========================================
#[derive(Debug, Default)]
struct PanelData {
    employees: Vec<EmployeeRecord>,
    missed_table: MissedIndicatorTable,
}

// ==========================================
// PanelApi - 面板 API
// ==========================================
#[derive(Clone)]
pub struct PanelApi {
    data: Arc<PanelData>,
    filter_engine: Arc<FilterEngine>,
    calculator: Arc<AdjustmentCalculator>,
    summary_engine: Arc<SummaryEngine>,
}

impl PanelApi {
    /// 用已加载的数据创建 API 实例
    pub fn new(employees: Vec<EmployeeRecord>, missed_table: MissedIndicatorTable) -> Self {
        Self {
            data: Arc::new(PanelData {
                employees,
                missed_table,
            }),
            filter_engine: Arc::new(FilterEngine::new()),
            calculator: Arc::new(AdjustmentCalculator::new()),
            summary_engine: Arc::new(SummaryEngine::new()),
        }
    }

    /// 按配置路径加载两份数据
    pub async fn load(loader: &dyn DatasetLoader, config: &ConfigManager) -> ApiResult<Self> {
        Self::load_from_paths(loader, &config.dataset_path(), &config.indicators_path()).await
    }

    #[instrument(skip(loader))]
    pub async fn load_from_paths(
        loader: &dyn DatasetLoader,
        dataset_path: &Path,
        indicators_path: &Path,
    ) -> ApiResult<Self> {
        let employees = loader.load_employees(dataset_path).await?;
        let missed_table = loader.load_missed_indicators(indicators_path).await?;

        info!(
            employees = employees.len(),
            companies = missed_table.company_count(),
            "面板数据就绪"
        );
        Ok(Self::new(employees, missed_table))
    }

    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.data.employees
    }

    pub fn missed_table(&self) -> &MissedIndicatorTable {
        &self.data.missed_table
    }

    // ==========================================
    // 面板计算
    // ==========================================

    /// 完整重算一次面板
    ///
    /// 不会失败: 未匹配的筛选返回空结果，缺失的指标表项视为无扣减
    #[instrument(skip(self, request), fields(period = %request.period))]
    pub fn compute(&self, request: &PanelRequest) -> PanelView {
        let filtered = self
            .filter_engine
            .filter(&self.data.employees, &request.criteria);

        let figures =
            self.calculator
                .adjust_batch(&filtered, request.period, &self.data.missed_table);

        let summary = self.summary_engine.summarize(&figures);
        let warning = self.summary_engine.missed_indicator_warning(
            &request.criteria,
            request.period,
            &self.data.missed_table,
        );

        let monthly_target = !request.period.is_quarter();
        let cards = filtered
            .iter()
            .zip(figures)
            .enumerate()
            .map(|(index, (record, figures))| EmployeeCard {
                index,
                column: index % CARD_COLUMNS,
                display_name: record.display_name(),
                role: record.role.clone(),
                city: record.city.clone(),
                company: record.company.clone(),
                tenure: record.tenure.clone(),
                highlight: record.highlight,
                monthly_target,
                progress_pct: figures.pct_fulfilled.clamp(0.0, 100.0),
                figures,
            })
            .collect();

        PanelView {
            period: request.period,
            criteria: request.criteria.clone(),
            summary,
            warning,
            cards,
        }
    }

    // ==========================================
    // 辅助查询
    // ==========================================

    /// 下拉框选项
    pub fn filter_options(&self) -> FilterOptions {
        let employees = &self.data.employees;
        FilterOptions {
            companies: with_sentinel(employees.iter().map(|r| r.company.as_str())),
            roles: with_sentinel(employees.iter().map(|r| r.role.as_str())),
            cities: with_sentinel(employees.iter().map(|r| r.city.as_str())),
            tenures: distinct_sorted(employees.iter().map(|r| r.tenure.as_str())),
            periods: Period::OPTIONS
                .iter()
                .map(|p| p.label().to_string())
                .collect(),
        }
    }

    /// 某公司某月未完成的指标（直接查表）
    pub fn missed_indicators(&self, company: &str, month: Month) -> Vec<String> {
        self.data.missed_table.missed(company, month).to_vec()
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn with_sentinel<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(ALL_SENTINEL.to_string())
        .chain(distinct_sorted(values))
        .collect()
}
