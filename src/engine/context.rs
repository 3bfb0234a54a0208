// ==========================================
// 节日烘焙排产系统 - 计划请求上下文
// ==========================================
// 职责: 每次计划请求的可观测性上下文 (请求 ID、根 span、计数器)
// 说明: 显式传入每个引擎操作, 不依赖进程级全局日志状态
// ==========================================

use std::cell::Cell;
use tracing::Span;
use uuid::Uuid;

/// 计划请求上下文
///
/// 单线程使用 (计数器为 Cell), 每个请求新建一个
#[derive(Debug)]
pub struct PlanningContext {
    request_id: Uuid,
    event_id: Option<i64>,
    span: Span,
    compositions_visited: Cell<u64>,
    external_checks: Cell<u64>,
}

impl PlanningContext {
    /// 创建新的请求上下文
    ///
    /// # 参数
    /// - operation: 发起的业务操作名 (记录在根 span 上)
    pub fn new(operation: &str) -> Self {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "planning_request",
            request_id = %request_id,
            operation = operation,
            event_id = tracing::field::Empty
        );
        Self {
            request_id,
            event_id: None,
            span,
            compositions_visited: Cell::new(0),
            external_checks: Cell::new(0),
        }
    }

    /// 为某个活动创建请求上下文
    pub fn for_event(operation: &str, event_id: i64) -> Self {
        let mut ctx = Self::new(operation);
        ctx.event_id = Some(event_id);
        ctx.span.record("event_id", event_id);
        ctx
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn event_id(&self) -> Option<i64> {
        self.event_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 在根 span 下创建引擎操作子 span
    pub fn child_span(&self, op: &'static str) -> Span {
        tracing::debug_span!(parent: &self.span, "planning_op", op = op)
    }

    // ===== 计数器 =====

    pub(crate) fn record_composition_visit(&self) {
        self.compositions_visited
            .set(self.compositions_visited.get().saturating_add(1));
    }

    pub(crate) fn record_external_check(&self) {
        self.external_checks
            .set(self.external_checks.get().saturating_add(1));
    }

    /// 已遍历的组成关系条数
    pub fn compositions_visited(&self) -> u64 {
        self.compositions_visited.get()
    }

    /// 已调用的外部检查次数
    pub fn external_checks(&self) -> u64 {
        self.external_checks.get()
    }

    /// 请求结束时输出统计
    pub fn log_summary(&self) {
        let _guard = self.span.enter();
        tracing::info!(
            compositions_visited = self.compositions_visited(),
            external_checks = self.external_checks(),
            "计划请求完成"
        );
    }
}
