/*!
 * Telemetry
 * Typed usage samples, the sliding history window and the sampler line parser
 */

mod history;
mod parser;
mod sample;

pub use history::UsageHistory;
pub use parser::SampleLineParser;
pub use sample::UsageSample;
