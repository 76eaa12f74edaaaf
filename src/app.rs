//! To-do Shell App
//!
//! Reads one command per line, forwards it to the view and redraws the screen
//! whenever the synchronizer publishes a change.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use todo_sync_lib::{TodoView, ViewState};

use crate::commands::{Intent, HELP};
use crate::components::{DbFetchPanel, NewItemForm, SubscriptionPanel, TodoListPanel};
use crate::context::UserContext;

pub struct App {
    view: TodoView,
    user: UserContext,
    /// Add/delete calls still in flight
    pending: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(view: TodoView, user: UserContext) -> Self {
        Self {
            view,
            user,
            pending: Vec::new(),
        }
    }

    /// Run until `signout` or end of input, then tear the view down.
    pub async fn run<R, W>(mut self, input: R, output: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.view.mount().await;
        let mut changes = self.view.changes();
        let _ = changes.borrow_and_update();
        self.render(output).await?;
        write_line(output, "Type 'help' for commands.").await?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Intent::parse(&line) {
                        Ok(Intent::SignOut) => break,
                        Ok(intent) => self.dispatch(intent, output).await?,
                        Err(e) => write_line(output, &e.to_string()).await?,
                    }
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let _ = changes.borrow_and_update();
                    self.render(output).await?;
                }
            }
        }

        self.sign_out(output).await
    }

    async fn dispatch<W>(&mut self, intent: Intent, output: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.pending.retain(|handle| !handle.is_finished());
        match intent {
            Intent::SetName(text) => self.view.on_name_change(text),
            Intent::SetDescription(text) => self.view.on_description_change(text),
            Intent::Add => {
                if self.view.draft().name.is_empty() {
                    write_line(output, "Name is required.").await?;
                }
                self.pending.push(self.view.on_add_clicked());
            }
            Intent::Delete(id) => self.pending.push(self.view.on_delete_clicked(id)),
            Intent::Show => self.render(output).await?,
            Intent::Help => write_line(output, HELP).await?,
            Intent::Nothing | Intent::SignOut => {}
        }
        Ok(())
    }

    async fn sign_out<W>(&mut self, output: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Background call failed");
            }
        }
        self.render(output).await?;
        self.view.on_sign_out().await;
        tracing::info!("Signed out");
        write_line(output, "Signed out.").await
    }

    async fn render<W>(&self, output: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let screen = render_screen(&self.user, &self.view.snapshot());
        output.write_all(screen.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }
}

async fn write_line<W>(output: &mut W, text: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

pub const TITLE: &str = "TODO APP with Amplify + GraphQL";

pub fn render_screen(user: &UserContext, state: &ViewState) -> String {
    let created = state.created_here.to_vec();
    let fetched = state.items.to_vec();
    let observed = state.observed.to_vec();

    format!(
        "\n{}\n{}\n\n{}\n{}\n{}\n{}",
        TITLE,
        user.welcome_line(),
        NewItemForm { draft: &state.draft },
        TodoListPanel { items: &created },
        DbFetchPanel { items: &fetched },
        SubscriptionPanel { items: &observed },
    )
}
