use graph_segmentation::{absolute_difference, SegmentationParams, SelectiveSearch, WeightedGraph};
use std::error::Error;
use std::{env, fs};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| String::from("test_data.csv"));
    let granularity = match args.next() {
        Some(k) => k.parse::<f64>()?,
        None => SegmentationParams::default().granularity(),
    };

    let contents = fs::read_to_string(&path)?;
    let rows = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(',')
                .map(|num| num.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width = rows.first().map_or(0, Vec::len);
    if let Some((n, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(format!("row {n} has {} values, expected {width}", row.len()).into());
    }
    let values: Vec<f32> = rows.into_iter().flatten().collect();

    let graph = WeightedGraph::from_grid(&values, width, absolute_difference)?;
    let params = SegmentationParams::builder().granularity(granularity).build();
    let labels = SelectiveSearch::new(&graph, params).label_grid()?;
    for row in labels.chunks(width) {
        let line = row
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("{line}");
    }
    Ok(())
}
