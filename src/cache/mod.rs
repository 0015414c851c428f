//! 对象缓存层
//!
//! 通过插件注册表选择缓存后端（当前内置 Moka 内存缓存）。
//! 题库的学生答题视图等读多写少的数据走这一层。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存后端插件
///
/// 在程序启动前（ctor）将构造函数注册进插件注册表，
/// 运行时按配置的名称查找。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new().map_err(|e| {
                                $crate::errors::ExamSystemError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
