//! Native logger trait for concrete logging backends

use super::{error::Result, log_record::LogRecord};

/// A concrete logging backend the adapter delegates to.
///
/// Implementations are shared behind `Arc` and may be called from several
/// threads, so emission takes `&self`.
pub trait NativeLogger: Send + Sync {
    fn log(&self, record: &LogRecord) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
