use fibre_container::{make, Container};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  let container = Container::new();

  // --- Registration ---
  // Register both implementations under distinct keys, with aliases.
  container
    .singleton_trait::<dyn MessageSender, _>("email", |_| Ok(Arc::new(EmailSender)))
    .singleton_trait::<dyn MessageSender, _>("sms", |_| Ok(Arc::new(SmsSender)))
    .alias("email", ["mail", "default_sender"])
    .alias("sms", "text");

  // --- Resolution ---
  let email_notifier = make!(container, trait MessageSender, "default_sender");
  let sms_notifier = make!(container, trait MessageSender, "text");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}
