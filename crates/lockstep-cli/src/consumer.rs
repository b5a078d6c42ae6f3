use futures::StreamExt;
use lockstep::Producer;
use std::io::Write;

/// Drains the producer stream in order, writing one value per line.
///
/// Terminates normally at end-of-stream and returns the number of values
/// consumed. A cancellation item or a write failure ends the loop early with
/// an error; dropping the producer on that path stops the pump, so no
/// further positions are produced after an abnormal exit.
pub async fn run<W: Write>(mut producer: Producer, out: &mut W) -> anyhow::Result<u64> {
    let mut consumed = 0;

    while let Some(item) = producer.next().await {
        let value = item?;
        writeln!(out, "{value}")?;
        consumed += 1;
    }

    Ok(consumed)
}
