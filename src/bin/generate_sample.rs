//! Write a sample score table in the shape produced by a HITS ranking run:
//! the top-K nodes by authority score, and for every pair `i < j` among them
//! the Jaccard coefficient of their in-neighbour sets, with 3 decimals.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const TOL: f64 = 1e-10;
const MAX_ITER: usize = 200;

#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write a top-K Jaccard sample table")]
struct Args {
    /// Number of nodes in the random graph.
    #[arg(long, default_value_t = 60)]
    nodes: usize,
    /// How many top-authority nodes to compare.
    #[arg(short = 'k', long = "top-k", default_value_t = 8)]
    top_k: usize,
    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

// ---------------------------------------------------------------------------
// Graph and HITS
// ---------------------------------------------------------------------------

/// Directed graph kept as both out- and in-neighbour sets.
struct Graph {
    out: Vec<BTreeSet<usize>>,
    inc: Vec<BTreeSet<usize>>,
}

impl Graph {
    fn from_edges(no_nodes: usize, edges: &[(usize, usize)]) -> Self {
        let mut out = vec![BTreeSet::new(); no_nodes];
        let mut inc = vec![BTreeSet::new(); no_nodes];
        for &(from, to) in edges {
            out[from].insert(to);
            inc[to].insert(from);
        }
        Graph { out, inc }
    }

    /// Up to six out-edges per node, skewed towards low node ids so a few
    /// nodes collect most of the authority.
    fn random(no_nodes: usize, rng: &mut SimpleRng) -> Self {
        let mut edges = Vec::new();
        for from in 0..no_nodes {
            for _ in 0..=rng.below(6) {
                let span = rng.below(no_nodes) + 1;
                let to = rng.below(span);
                if to != from {
                    edges.push((from, to));
                }
            }
        }
        Graph::from_edges(no_nodes, &edges)
    }

    fn len(&self) -> usize {
        self.out.len()
    }
}

fn normalize(v: &mut [f64]) {
    let sum: f64 = v.iter().sum();
    if sum > 0.0 {
        v.iter_mut().for_each(|x| *x /= sum);
    }
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Authority and hub scores, each summing to one.
fn hits(graph: &Graph) -> (Vec<f64>, Vec<f64>) {
    let n = graph.len();
    let mut a = vec![1.0 / n as f64; n];
    let mut h = vec![1.0 / n as f64; n];

    for iter in 0..MAX_ITER {
        let mut a_new: Vec<f64> = graph
            .inc
            .iter()
            .map(|srcs| srcs.iter().map(|&j| h[j]).sum())
            .collect();
        let mut h_new: Vec<f64> = graph
            .out
            .iter()
            .map(|dsts| dsts.iter().map(|&j| a[j]).sum())
            .collect();
        normalize(&mut a_new);
        normalize(&mut h_new);

        let converged = distance(&a, &a_new) < TOL && distance(&h, &h_new) < TOL;
        a = a_new;
        h = h_new;
        if converged {
            log::debug!("HITS converged after {} iterations", iter + 1);
            break;
        }
    }
    (a, h)
}

/// Indices of the `k` largest scores, best first.
fn top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..scores.len()).collect();
    idx.sort_by(|&l, &r| scores[r].total_cmp(&scores[l]));
    idx.truncate(k);
    idx
}

/// |a ∩ b| / |a ∪ b|; `NaN` when both sets are empty.
fn jaccard(a: &BTreeSet<usize>, b: &BTreeSet<usize>) -> f64 {
    let union = a.union(b).count();
    a.intersection(b).count() as f64 / union as f64
}

/// `(n1, n2, jac)` for every `i < j` in rank order.
fn pair_scores(graph: &Graph, ranked: &[usize]) -> Vec<(usize, usize, f64)> {
    let mut rows = Vec::new();
    for (i, &n1) in ranked.iter().enumerate() {
        for &n2 in &ranked[i + 1..] {
            rows.push((n1, n2, jaccard(&graph.inc[n1], &graph.inc[n2])));
        }
    }
    rows
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.nodes == 0 {
        bail!("the graph needs at least one node");
    }
    if args.top_k > args.nodes {
        bail!("top-k ({}) exceeds the number of nodes ({})", args.top_k, args.nodes);
    }

    let mut rng = SimpleRng::new(args.seed);
    let graph = Graph::random(args.nodes, &mut rng);
    let (authority, _hub) = hits(&graph);
    let ranked = top_k(&authority, args.top_k);
    log::info!("Top-{} nodes (a): {ranked:?}", args.top_k);

    let rows = pair_scores(&graph, &ranked);

    // Write CSV
    let csv_path = format!("sample_k{}_a.csv", args.top_k);
    let mut writer = csv::Writer::from_path(&csv_path).context("creating CSV output")?;
    writer
        .write_record(["n1", "n2", "jac"])
        .context("writing CSV header")?;
    for &(n1, n2, jac) in &rows {
        writer
            .write_record([n1.to_string(), n2.to_string(), format!("{jac:.3}")])
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    // Write Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("n1", DataType::Int64, false),
        Field::new("n2", DataType::Int64, false),
        Field::new("jac", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(
            rows.iter().map(|r| r.0 as i64).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            rows.iter().map(|r| r.1 as i64).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|r| (r.2 * 1e3).round() / 1e3)
                .collect::<Vec<_>>(),
        )),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = format!("sample_k{}_a.parquet", args.top_k);
    let file = std::fs::File::create(&parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} pairs to {csv_path} and {parquet_path}",
        rows.len()
    );
    Ok(())
}
