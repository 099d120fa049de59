use std::env::{self, VarError};
use std::error::Error;
use std::str::FromStr;

pub trait FromEnv: Sized {
    fn from_env(env_var: &str) -> anyhow::Result<Self>;
}

impl<T: FromStr> FromEnv for T
where
    <T as FromStr>::Err: 'static + Error + Send + Sync,
{
    fn from_env(env_var: &str) -> anyhow::Result<Self> {
        let value = env::var(env_var)?;
        Ok(T::from_str(&value)?)
    }
}

/// Reads an optional variable, falling back to `default` when unset.
/// A present-but-unparsable value is still an error.
pub fn from_env_or<T: FromStr>(env_var: &str, default: T) -> anyhow::Result<T>
where
    <T as FromStr>::Err: 'static + Error + Send + Sync,
{
    match env::var(env_var) {
        Ok(value) => Ok(T::from_str(&value)?),
        Err(VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}
