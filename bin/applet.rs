use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod play;
mod serve;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Serve(serve::Serve),
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute().await,
            Applet::Serve(a) => a.execute().await,
        }
    }
}
