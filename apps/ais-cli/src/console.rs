//! Terminal side of the interactive flows

use ais_core::provider::user_interaction::{UserInteraction, UserInteractionError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use url::Url;

pub struct ConsoleInteraction<R> {
    input: Mutex<R>,
}

impl ConsoleInteraction<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ConsoleInteraction<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> UserInteraction for ConsoleInteraction<R> {
    async fn authorization_code(
        &self,
        authorization_url: &Url,
    ) -> Result<String, UserInteractionError> {
        println!("click url to retrieve JWT code: {authorization_url}");

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| UserInteractionError::Failed(e.to_string()))?;

        match line.trim() {
            _ if read == 0 => Err(UserInteractionError::NoCode),
            "" => Err(UserInteractionError::NoCode),
            code => Ok(code.to_string()),
        }
    }

    async fn consent_url(&self, consent_url: &str) {
        println!("open to confirm the signature: {consent_url}");
    }
}
