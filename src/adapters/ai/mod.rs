//! AI adapters - Oracle port implementations.

mod mock_oracle;
mod openai_oracle;

pub use mock_oracle::MockOracle;
pub use openai_oracle::{OpenAiOracle, OpenAiOracleConfig};
