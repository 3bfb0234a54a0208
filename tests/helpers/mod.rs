// ==========================================
// 集成测试共享构建器
// ==========================================
#![allow(dead_code)]

pub mod mock_checkers;
pub mod test_data_builder;
