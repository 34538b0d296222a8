//! Line-oriented terminal front end
//!
//! Renders the current view as text and reads commands: a path navigates,
//! `submit` fills in and sends the current form, `open N` and `cancel` act on
//! the order views, `logout` ends the session and `quit` leaves. An empty
//! line reloads the current route.

use crate::app::{AppContext, View};
use crate::router::Route;
use crate::types::{Credentials, OrderId, OrderRequest, RegistrationRequest};
use crate::ui::ConsoleNavigator;
use crate::views::{LoginResult, OrdersLoad};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "Commands: <path> | submit | open <n> | refresh | cancel | logout | help | quit";

enum Step {
    Stay,
    Reload,
    Go(Route),
    Quit,
}

pub struct Shell<R, W> {
    ctx: AppContext,
    navigator: Arc<ConsoleNavigator>,
    input: R,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// `navigator` must be the same instance the context navigates through
    pub fn new(ctx: AppContext, navigator: Arc<ConsoleNavigator>, input: R, out: W) -> Self {
        Self {
            ctx,
            navigator,
            input,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input
    pub async fn run(&mut self, start: Route) -> io::Result<()> {
        let mut route = start;

        'routes: loop {
            let mut view = self.ctx.open(&route).await;
            if let Some(next) = self.navigator.take_pending() {
                route = next;
                continue;
            }

            loop {
                self.render(&view)?;
                let Some(command) = self.prompt("> ").await? else {
                    break 'routes;
                };

                let step = self.dispatch(&mut view, command.trim()).await?;
                if let Some(next) = self.navigator.take_pending() {
                    route = next;
                    continue 'routes;
                }
                match step {
                    Step::Stay => {},
                    Step::Reload => continue 'routes,
                    Step::Go(next) => {
                        route = next;
                        continue 'routes;
                    },
                    Step::Quit => break 'routes,
                }
            }
        }

        writeln!(self.out, "Bye.")?;
        Ok(())
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for each label in turn; `None` on end of input
    async fn fields(&mut self, labels: &[&str]) -> io::Result<Option<Vec<String>>> {
        let mut values = Vec::with_capacity(labels.len());
        for label in labels {
            match self.prompt(&format!("{}: ", label)).await? {
                Some(value) => values.push(value.trim().to_string()),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    async fn dispatch(&mut self, view: &mut View, command: &str) -> io::Result<Step> {
        match command {
            "quit" | "exit" => Ok(Step::Quit),
            "" => Ok(Step::Reload),
            "help" => {
                writeln!(self.out, "{}", HELP)?;
                Ok(Step::Stay)
            },
            "logout" => {
                self.ctx.logout();
                Ok(Step::Stay)
            },
            path if path.starts_with('/') => match Route::parse(path) {
                Ok(route) => Ok(Step::Go(route)),
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    Ok(Step::Stay)
                },
            },
            _ => self.act(view, command).await,
        }
    }

    async fn act(&mut self, view: &mut View, command: &str) -> io::Result<Step> {
        match view {
            View::Login(login) if command == "submit" => {
                let Some(values) = self.fields(&["Email", "Password"]).await? else {
                    return Ok(Step::Quit);
                };
                let mut values = values.into_iter();
                login.form = Credentials::new(
                    values.next().unwrap_or_default(),
                    values.next().unwrap_or_default(),
                );
                if let LoginResult::LoggedIn(user) = login.submit().await {
                    let who = user.name.or(user.email).unwrap_or_else(|| login.form.email.clone());
                    writeln!(self.out, "Signed in as {}", who)?;
                }
            },
            View::Register(register) if command == "submit" => {
                let Some(values) = self
                    .fields(&["Name", "Email", "Password", "Phone", "Location (optional)"])
                    .await?
                else {
                    return Ok(Step::Quit);
                };
                let mut values = values.into_iter();
                register.form = RegistrationRequest {
                    name: values.next().unwrap_or_default(),
                    email: values.next().unwrap_or_default(),
                    password: values.next().unwrap_or_default(),
                    phone: values.next().unwrap_or_default(),
                    location: values.next().filter(|l| !l.is_empty()),
                };
                register.submit().await;
            },
            View::PlaceOrder(place) if command == "submit" => {
                let Some(values) = self
                    .fields(&[
                        "Pickup address",
                        "Drop-off address",
                        "Delivery option",
                        "Package details",
                        "Accept the terms? [y/N]",
                    ])
                    .await?
                else {
                    return Ok(Step::Quit);
                };
                let mut values = values.into_iter();
                place.form = OrderRequest {
                    pickup: values.next().unwrap_or_default(),
                    drop_off: values.next().unwrap_or_default(),
                    delivery: values.next().unwrap_or_default(),
                    package_details: values.next().unwrap_or_default(),
                    terms: values.next().is_some_and(|t| t.eq_ignore_ascii_case("y")),
                };
                place.submit().await;
            },
            View::MyOrders(orders) if command.starts_with("open ") => {
                let index = command["open ".len()..].trim().parse::<usize>().ok();
                match index.and_then(|n| n.checked_sub(1)) {
                    Some(index) if orders.view_order_details(index).is_some() => {},
                    _ => writeln!(self.out, "No such order.")?,
                }
            },
            View::MyOrders(orders) if command == "refresh" => {
                if let OrdersLoad::Loaded(count) = orders.load().await {
                    writeln!(self.out, "{} orders.", count)?;
                }
            },
            View::OrderDetails(details) if command == "cancel" => {
                details.cancel().await;
            },
            _ => writeln!(self.out, "Unknown command '{}'. {}", command, HELP)?,
        }
        Ok(Step::Stay)
    }

    fn render(&mut self, view: &View) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", view.route())?;
        match view {
            View::Login(_) => writeln!(self.out, "Log in with `submit`, or go to /register.")?,
            View::Register(_) => writeln!(self.out, "Create an account with `submit`.")?,
            View::PlaceOrder(_) => writeln!(self.out, "Place a delivery order with `submit`.")?,
            View::MyOrders(orders) => {
                if orders.orders().is_empty() {
                    writeln!(self.out, "No orders.")?;
                }
                for (n, order) in orders.orders().iter().enumerate() {
                    let status = order.status.as_ref().map(|s| s.as_str()).unwrap_or("-");
                    let id = order.id.as_ref().map(OrderId::as_str).unwrap_or("?");
                    writeln!(self.out, "  [{}] order {} ({})", n + 1, id, status)?;
                }
                writeln!(self.out, "`open <n>` shows an order, `refresh` reloads the list.")?;
            },
            View::OrderDetails(details) => match details.details() {
                Some(order) => {
                    writeln!(self.out, "Status: {}", order.status)?;
                    for (key, value) in &order.fields {
                        writeln!(self.out, "  {}: {}", key, value)?;
                    }
                    if order.status.is_cancellable() {
                        writeln!(self.out, "`cancel` cancels this order.")?;
                    }
                },
                None => writeln!(self.out, "No order details available.")?,
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::mock_api::{ApiCall, MockDeliveryApi, RecordingUi};
    use crate::session::{MemorySessionStore, SessionStore, SessionToken};
    use crate::types::{LoginOutcome, UserProfile};
    use crate::ui::messages;

    fn shell<'a>(
        api: &Arc<MockDeliveryApi>,
        session: &Arc<MemorySessionStore>,
        ui: &Arc<RecordingUi>,
        input: &'a [u8],
    ) -> Shell<&'a [u8], Vec<u8>> {
        let navigator = Arc::new(ConsoleNavigator::new());
        let ctx = AppContext::new(api.clone(), session.clone(), ui.clone(), navigator.clone());
        Shell::new(ctx, navigator, input, Vec::new())
    }

    #[tokio::test]
    async fn test_login_through_the_shell() {
        let api = Arc::new(MockDeliveryApi::new());
        api.push_login(Ok(LoginOutcome::Authenticated {
            token: SessionToken::new("abc"),
            user: UserProfile {
                name: Some("Ahmed".to_string()),
                ..UserProfile::default()
            },
        }));
        let session = Arc::new(MemorySessionStore::new());
        let ui = Arc::new(RecordingUi::new());

        let mut shell = shell(&api, &session, &ui, b"submit\na@b.com\nx\nquit\n");
        shell.run(Route::Login).await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();

        assert!(output.contains("== /login =="));
        assert!(output.contains("Signed in as Ahmed"));
        assert_eq!(session.token().unwrap(), Some(SessionToken::new("abc")));
        assert_eq!(api.calls(), vec![ApiCall::Login(Credentials::new("a@b.com", "x"))]);
        assert_eq!(ui.alerts(), vec![messages::LOGIN_SUCCESS.to_string()]);
    }

    #[tokio::test]
    async fn test_orders_without_session_land_on_login() {
        let api = Arc::new(MockDeliveryApi::new());
        let session = Arc::new(MemorySessionStore::new());
        let ui = Arc::new(RecordingUi::new());

        let mut shell = shell(&api, &session, &ui, b"");
        shell.run(Route::MyOrders).await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();

        assert!(output.contains("== /login =="));
        assert!(!output.contains("== /my-orders =="));
        assert!(api.calls().is_empty());
        assert_eq!(ui.alerts(), vec![messages::ORDERS_LOGIN_REQUIRED.to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_path_is_reported() {
        let api = Arc::new(MockDeliveryApi::new());
        let session = Arc::new(MemorySessionStore::new());
        let ui = Arc::new(RecordingUi::new());

        let mut shell = shell(&api, &session, &ui, b"/nowhere\n/register\nquit\n");
        shell.run(Route::Login).await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();

        assert!(output.contains("No route matches /nowhere"));
        assert!(output.contains("== /register =="));
        assert!(output.ends_with("Bye.\n"));
    }
}
