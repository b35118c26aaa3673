// ==========================================
// 季度奖金面板 - 导入层
// ==========================================
// 职责: 加载外部只读数据（员工数据集 + 漏报指标表）
// 支持: JSON, CSV, Excel
// ==========================================

pub mod data_loader;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod loader_trait;

// 重导出核心类型
pub use data_loader::BonusDataLoader;
pub use error::{ImportError, ImportResult};
pub use field_mapper::EmployeeFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, SourceFormat, UniversalFileParser};

// 重导出 Trait 接口
pub use loader_trait::{DatasetLoader, FieldMapper, FileParser};
