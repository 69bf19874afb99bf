use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

pub static DOCUMENTS_GENERATED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gst_documents_generated_total",
        "Documents generated, by kind and outcome",
        &["kind", "outcome"]
    )
    .expect("metric registration")
});

pub static GENERATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gst_document_generation_seconds",
        "Wall time spent rendering and compiling a document",
        &["kind"]
    )
    .expect("metric registration")
});
