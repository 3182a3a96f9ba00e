//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{
        AnswerOutcome, ConnectionId, ConnectionIdFactory, MessageText, ParticipantName, PollDraft,
    },
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "failed to generate connection id");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) {
    let (mut sender, mut receiver) = socket.split();

    // Attach the outbound channel before reading any action from this client
    let (tx, mut rx) = mpsc::unbounded_channel();
    state.broadcaster.register(connection_id.clone(), tx).await;
    tracing::info!(conn_id = %connection_id, "client connected");

    let recv_state = state.clone();
    let recv_id = connection_id.clone();

    // Spawn a task to receive actions from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(conn_id = %recv_id, error = %e, "websocket error");
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(action) => dispatch(&recv_state, &recv_id, action).await,
                    Err(e) => {
                        tracing::warn!(conn_id = %recv_id, error = %e, "dropping unparseable frame");
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(conn_id = %recv_id, "client requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward session events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.broadcaster.unregister(&connection_id).await;
    state.facade.disconnect(&connection_id).await;
    tracing::info!(conn_id = %connection_id, "client disconnected");
}

/// Validate an inbound action and hand it to the session facade.
///
/// Failures other than a rejected answer are logged and otherwise dropped.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, action: ClientMessage) {
    let facade = &state.facade;
    match action {
        ClientMessage::JoinAsTeacher => {
            facade.join_teacher(connection_id).await;
            tracing::info!(conn_id = %connection_id, "teacher joined");
        }
        ClientMessage::JoinAsStudent { name } => {
            let name = match ParticipantName::try_from(name) {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(conn_id = %connection_id, error = %e, "invalid student name");
                    return;
                }
            };
            match facade.join_student(connection_id.clone(), name).await {
                Ok(participant) => {
                    tracing::info!(conn_id = %connection_id, name = %participant.name, "student joined");
                }
                Err(e) => tracing::warn!(conn_id = %connection_id, error = %e, "join rejected"),
            }
        }
        ClientMessage::CreatePoll {
            question,
            options,
            correct_answers,
            timer,
        } => {
            let draft = match PollDraft::new(question, options, correct_answers, timer) {
                Ok(draft) => draft,
                Err(e) => {
                    tracing::warn!(conn_id = %connection_id, error = %e, "invalid poll");
                    return;
                }
            };
            if let Err(e) = facade.create_poll(draft).await {
                tracing::warn!(conn_id = %connection_id, error = %e, "create-poll rejected");
            }
        }
        ClientMessage::SubmitAnswer { option_index } => {
            // Rejections are reported to the caller by the use case itself
            if let AnswerOutcome::Accepted { ended: Some(poll), .. } =
                facade.submit_answer(connection_id, option_index).await
            {
                tracing::debug!(poll_id = %poll.id, "answer completed the poll");
            }
        }
        ClientMessage::SendMessage { message } => {
            let text = match MessageText::try_from(message) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(conn_id = %connection_id, error = %e, "invalid chat message");
                    return;
                }
            };
            if let Err(e) = facade.send_message(connection_id, text).await {
                tracing::warn!(conn_id = %connection_id, error = %e, "send-message rejected");
            }
        }
        ClientMessage::KickStudent { student_id } => {
            let student_id = match ConnectionId::try_from(student_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(conn_id = %connection_id, error = %e, "invalid student id");
                    return;
                }
            };
            if let Err(e) = facade.kick_student(&student_id).await {
                tracing::warn!(conn_id = %connection_id, error = %e, "kick-student rejected");
            }
        }
    }
}
