use crate::core::Dataset;
use crate::core::attributes::Attribute;

/// Twenty cases in two well separated clusters, labels alternating by row.
pub fn two_clusters() -> Dataset {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut labels = Vec::new();
    for i in 0..10 {
        let jitter = f64::from(i) * 0.1;
        xs.push(jitter);
        ys.push(1.0 - jitter);
        labels.push("left");
        xs.push(10.0 + jitter);
        ys.push(11.0 - jitter);
        labels.push("right");
    }
    Dataset::new(
        "two_clusters",
        vec![
            Attribute::quantitative("x", xs),
            Attribute::quantitative("y", ys),
            Attribute::qualitative("class", labels),
        ],
    )
    .expect("columns have equal length")
}
