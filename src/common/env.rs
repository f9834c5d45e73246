use std::env;
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
        let value = env::var(env_var)
            .map_err(|e| anyhow::anyhow!("{env_var} is not set: {e}"))?;
        T::from_str(value.trim()).map_err(|e| anyhow::anyhow!("{env_var} is invalid: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::FromEnv;

    #[test]
    fn missing_variable_names_the_key() {
        let err = u16::from_env("MESSAGE_BOARD_TEST_UNSET_PORT").unwrap_err();
        assert!(err.to_string().contains("MESSAGE_BOARD_TEST_UNSET_PORT"));
    }
}
