use shopmail::{
    sender, Connection, Mail, MailAddress, MailTemplate, MailTransport, MemoryConfig, Sender,
    SenderBuilder, Sendmail, SwiftMailerTransport,
};

struct MissingSendmail;

impl SenderBuilder for MissingSendmail {
    fn build(&self, connection: &Connection) -> sender::Result<Box<dyn Sender>> {
        assert_eq!(&Connection::Mail, connection);
        Ok(Box::new(Sendmail::with_cmd("/does/not/exist/sendmail")))
    }
}

#[test]
fn test_sendmail_sender_failure_is_reported_as_false() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = MemoryConfig::default().with("PS_MAIL_METHOD", 1);
    let transport = SwiftMailerTransport::new(config).with_sender_builder(MissingSendmail);

    let mail = Mail {
        shop_id: 1,
        from: MailAddress::new("alice@localhost"),
        to: vec![MailAddress::new("patrick@localhost")],
        reply_to: MailAddress::new("alice@localhost"),
        subject: "Plain message".into(),
        templates: vec![MailTemplate::simple("text/plain", "Plain message")],
        ..Mail::default()
    };

    assert!(!transport.send_mail(&mail).unwrap());
}
