//! Operation boundary macros
//!
//! `log_op_start!` logs the start event and evaluates to the `Instant` the
//! operation began at. `log_op_end!` and `log_op_error!` take that instant
//! back and derive `duration_ms` from it, so every boundary reports timing
//! the same way.
//!
//! Right after the instant, `stall = <StallId>` records the `stall_id` field.
//! Any further `key = value` pairs are passed through to `tracing`.

/// Log the start of an operation and return its start time
///
/// # Example
///
/// ```
/// # use stallmap_core::log_op_start;
/// # use stallmap_core::model::StallId;
/// let started = log_op_start!("register_stall", product_count = 2);
/// let started = log_op_start!("move_stall", stall = StallId(3));
/// # let _ = started;
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, stall = $stall:expr $(, $($field:tt)*)?) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            stall_id = $crate::model::StallId::get($stall)
            $(, $($field)*)?
        );
        std::time::Instant::now()
    }};
    ($op:expr $(, $($field:tt)*)?) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START
            $(, $($field)*)?
        );
        std::time::Instant::now()
    }};
}

/// Log the successful end of an operation started at `$started`
///
/// # Example
///
/// ```
/// # use stallmap_core::{log_op_end, log_op_start};
/// let started = log_op_start!("clear_stalls");
/// log_op_end!("clear_stalls", started, stall_count = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $started:expr, stall = $stall:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            stall_id = $crate::model::StallId::get($stall)
            $(, $($field)*)?
        );
    };
    ($op:expr, $started:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started)
            $(, $($field)*)?
        );
    };
}

/// Log the failure of an operation started at `$started`
///
/// `$err` is anything convertible into `ExError`; its kind and stable code
/// are recorded.
///
/// # Example
///
/// ```
/// # use stallmap_core::{log_op_error, log_op_start, errors::StallError};
/// # use stallmap_core::model::StallId;
/// let started = log_op_start!("remove_stall", stall = StallId(1));
/// let err = StallError::StallNotFound { stall_id: 1 };
/// log_op_error!("remove_stall", started, err, stall = StallId(1));
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $started:expr, $err:expr, stall = $stall:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            stall_id = $crate::model::StallId::get($stall)
            $(, $($field)*)?
        );
    }};
    ($op:expr, $started:expr, $err:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message()
            $(, $($field)*)?
        );
    }};
}
