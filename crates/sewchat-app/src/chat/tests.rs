#[cfg(test)]
mod tests {
    use crate::chat::ChatController;
    use crate::history::HistoryStore;
    use crate::render::Render;
    use sewchat_api::ChatClient;
    use sewchat_models::{Message, Role, SessionRecord};
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Render surface that records every call, in order.
    #[derive(Default)]
    struct RecordingRender {
        events: Vec<String>,
    }

    impl Render for RecordingRender {
        fn message(&mut self, message: &Message) {
            let role = match message.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            self.events.push(format!("message:{}:{}", role, message.content));
        }

        fn show_typing(&mut self) {
            self.events.push("typing".to_string());
        }

        fn remove_typing(&mut self) {
            self.events.push("typing-removed".to_string());
        }

        fn clear_log(&mut self) {
            self.events.push("clear".to_string());
        }
    }

    async fn read_http_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..pos]);
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + content_length {
                    break;
                }
            }
        }
    }

    /// Serve the same canned response to `count` consecutive requests.
    async fn spawn_server(count: usize, status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for _ in 0..count {
                let (mut stream, _) = listener.accept().await.unwrap();
                read_http_request(&mut stream).await;

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body,
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.flush().await.unwrap();
                let _ = stream.shutdown().await;
            }
        });

        format!("http://{}/api/chat", addr)
    }

    /// An endpoint nothing is listening on.
    async fn dead_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/api/chat", addr)
    }

    fn test_store(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json")).unwrap()
    }

    #[tokio::test]
    async fn empty_input_sends_nothing_and_renders_nothing() {
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        // Endpoint is dead on purpose: reaching it would fail the test
        // with an error message in the conversation.
        let mut controller = ChatController::new(ChatClient::new(dead_endpoint().await));
        let mut render = RecordingRender::default();

        controller.submit("", &history, &mut render).await.unwrap();
        controller.submit("   \t ", &history, &mut render).await.unwrap();

        assert!(controller.conversation().is_empty());
        assert!(render.events.is_empty());
        assert!(history.sessions().is_empty());
    }

    #[tokio::test]
    async fn successful_submit_renders_both_messages_and_records_history() {
        let url = spawn_server(1, "200 OK", r#"{"success":true,"response":"Hi there"}"#).await;
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(url));
        let mut render = RecordingRender::default();

        controller
            .submit("  Hello  ", &history, &mut render)
            .await
            .unwrap();

        // Input is trimmed, user message first, placeholder bracketed
        // around the request, exactly one assistant message.
        assert_eq!(
            render.events,
            vec![
                "message:user:Hello",
                "typing",
                "typing-removed",
                "message:assistant:Hi there",
            ]
        );

        let messages = controller.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::user("Hello"));
        assert_eq!(messages[1], Message::assistant("Hi there"));

        let sessions = history.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].messages, messages);
    }

    #[tokio::test]
    async fn http_error_becomes_one_assistant_message() {
        let url = spawn_server(1, "500 Internal Server Error", "boom").await;
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(url));
        let mut render = RecordingRender::default();

        controller.submit("Hello", &history, &mut render).await.unwrap();

        let messages = controller.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1].content,
            "Sorry, I encountered an error. HTTP error! status: 500"
        );

        // The failed exchange is still persisted.
        assert_eq!(history.sessions().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_server_becomes_one_assistant_message() {
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(dead_endpoint().await));
        let mut render = RecordingRender::default();

        controller.submit("Hello", &history, &mut render).await.unwrap();

        let messages = controller.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1]
            .content
            .starts_with("Sorry, I encountered an error. Could not connect to the server."));
    }

    #[tokio::test]
    async fn timed_out_request_becomes_one_assistant_message() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_http_request(&mut stream).await;
            // Hold the connection open without answering.
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            let _ = stream.shutdown().await;
        });

        let client = ChatClient::with_timeout(
            format!("http://{}/api/chat", addr),
            std::time::Duration::from_millis(200),
        );
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(client);
        let mut render = RecordingRender::default();

        controller.submit("Hello", &history, &mut render).await.unwrap();

        let messages = controller.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1].content,
            "Sorry, I encountered an error. The request timed out. Please check if the server is running."
        );
    }

    #[tokio::test]
    async fn each_reply_snapshots_the_growing_conversation() {
        let url = spawn_server(2, "200 OK", r#"{"success":true,"response":"Hi there"}"#).await;
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(url));
        let mut render = RecordingRender::default();

        controller.submit("Hello", &history, &mut render).await.unwrap();
        controller.submit("Again", &history, &mut render).await.unwrap();

        let sessions = history.sessions();
        assert_eq!(sessions.len(), 2);
        // Most recent first: the four-message snapshot precedes the
        // two-message one, which is kept untouched.
        assert_eq!(sessions[0].messages.len(), 4);
        assert_eq!(sessions[1].messages.len(), 2);
    }

    #[tokio::test]
    async fn load_session_replaces_conversation_in_order() {
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(dead_endpoint().await));
        let mut render = RecordingRender::default();

        controller.submit("old", &history, &mut render).await.unwrap();
        render.events.clear();

        let record = SessionRecord {
            id: 1,
            timestamp: "2024-08-01 12:00:00".to_string(),
            messages: vec![Message::user("Hello"), Message::assistant("Hi there")],
        };
        let before = history.sessions().len();

        controller.load_session(&record, &mut render);

        assert_eq!(
            render.events,
            vec![
                "clear",
                "message:user:Hello",
                "message:assistant:Hi there",
            ]
        );
        assert_eq!(controller.conversation().messages(), &record.messages[..]);
        // Loading renders without re-recording.
        assert_eq!(history.sessions().len(), before);
    }

    #[tokio::test]
    async fn reset_discards_conversation_without_persisting() {
        let dir = TempDir::new().unwrap();
        let history = test_store(&dir);
        let mut controller = ChatController::new(ChatClient::new(dead_endpoint().await));
        let mut render = RecordingRender::default();

        controller.submit("Hello", &history, &mut render).await.unwrap();
        let before = history.sessions().len();

        controller.reset(&mut render);

        assert!(controller.conversation().is_empty());
        assert_eq!(history.sessions().len(), before);
        assert_eq!(render.events.last().unwrap(), "clear");
    }
}
