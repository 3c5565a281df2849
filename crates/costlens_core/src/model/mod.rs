mod prediction;
mod records;
mod results;

pub use prediction::{
    BaseEstimate, Complexity, Parameter, ParameterValue, PredictionInput, PredictionResult,
    Quality,
};
pub use records::{BuildingRecord, RecordField};
pub use results::{
    CorrelationResult, DataQualityReport, MissingField, OutlierReport, RecordOutlier,
    SensitivityEntry, SensitivitySweep, WhatIfReport, WhatIfVariation,
};
