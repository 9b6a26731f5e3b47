//! Queue Layer - 同步任务队列的内存实现

mod memory;

pub use memory::InMemorySyncQueue;
