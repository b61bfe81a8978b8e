//! Narration log shown to the player.
//!
//! Append-only and bounded: once full, the oldest entry is discarded.
//! Iteration yields the newest entry first.

use std::collections::VecDeque;

/// 消息类型，用于颜色编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,     // 一般信息
    Movement, // 移动被阻挡等
    Combat,   // 战斗信息
    Item,     // 物品相关
    Progress, // 升级、胜利
    Warning,  // 失败、重置
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.entries.push_front(LogEntry {
            text: text.into(),
            kind,
        });
        self.entries.truncate(self.capacity);
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }

    /// 获取最近的消息（用于简要显示）
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().take(count)
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
