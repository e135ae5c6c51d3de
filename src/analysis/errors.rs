use thiserror::Error;

use crate::types::{Hour, ProductId, StaffId, YearMonth};

/// A per-file statistic that does not fit its numeric type.
#[derive(Debug, Error)]
pub enum StatisticsError {
    #[error("Sales volume overflowed")]
    SalesVolumeOverflow,
    #[error("Quantity of product [{product_id}] overflowed")]
    QuantityOverflow {
        product_id: ProductId
    },
    #[error("Sales for hour [{hour}] overflowed")]
    HourOverflow {
        hour: Hour
    },
    #[error("Sales for staff [{staff_id}] in [{month}] overflowed")]
    StaffSalesOverflow {
        staff_id: StaffId,
        month: YearMonth
    }
}
