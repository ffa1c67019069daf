use std::io::{stdout, Write};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use torpanel_common::models::CredentialField;
use torpanel_common::traits::CredentialPrompt;
use torpanel_common::Error;
use torpanel_core::i18n::Strings;

/// Stdin line reader shared by the command loop and the credential prompt,
/// so neither loses buffered input to the other.
#[derive(Clone)]
pub struct InputLines {
    inner: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl InputLines {
    pub fn stdin() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Next line without its terminator; `None` on EOF.
    pub async fn next_line(&self) -> Result<Option<String>, Error> {
        Ok(self.inner.lock().await.next_line().await?)
    }
}

/// Asks for credentials on the terminal. Blank answers and EOF count as declined.
pub struct StdinPrompt {
    input: InputLines,
    strings: &'static Strings,
}

impl StdinPrompt {
    pub fn new(input: InputLines, strings: &'static Strings) -> Self {
        Self { input, strings }
    }
}

#[async_trait]
impl CredentialPrompt for StdinPrompt {
    async fn ask(&self, field: CredentialField) -> Result<Option<String>, Error> {
        let label = match field {
            CredentialField::Username => self.strings.username_prompt,
            CredentialField::Password => self.strings.password_prompt,
        };
        print!("{} ", label);
        stdout().flush()?;

        let answer = self.input.next_line().await?;
        Ok(answer.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
    }
}
