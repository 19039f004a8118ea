use crate::{BuilderCommand, BuilderUpdate, Session};
use press_impose::{DocumentStore, layout_statistics, plan_async};
use tokio::sync::mpsc;

/// Async task that applies builder commands in order and sends updates
pub async fn session_task<S>(
    mut session: Session<S>,
    mut command_rx: mpsc::UnboundedReceiver<BuilderCommand>,
    update_tx: mpsc::UnboundedSender<BuilderUpdate>,
) where
    S: DocumentStore + Send + Sync,
{
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, session ending");
}

async fn process_command<S>(
    cmd: BuilderCommand,
    session: &mut Session<S>,
    command_rx: &mut mpsc::UnboundedReceiver<BuilderCommand>,
    update_tx: &mpsc::UnboundedSender<BuilderUpdate>,
) where
    S: DocumentStore + Send + Sync,
{
    match cmd {
        BuilderCommand::Assemble { request } => {
            let result = session.assemble(&request);
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::InsertBlank { at } => {
            session.insert_blank(at);
            send_sequence_or_error(Ok(()), session, update_tx);
        }
        BuilderCommand::InsertPage { at, source } => {
            let result = session.insert_page(at, source).map(|_| ());
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::Reorder { id, to } => {
            let result = session.reorder(id, to);
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::Replace { id, source } => {
            let result = session.replace(id, source);
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::Remove { id } => {
            let result = session.remove(id);
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::Rotate { id, rotation } => {
            let result = session.rotate(id, rotation);
            send_sequence_or_error(result, session, update_tx);
        }
        BuilderCommand::SetSpecification { specification } => {
            let update = match session.set_specification(specification) {
                Ok(specification) => BuilderUpdate::SpecificationResolved { specification },
                Err(errors) => BuilderUpdate::SpecificationRejected { errors },
            };
            let _ = update_tx.send(update);
        }
        BuilderCommand::Plan => {
            // Drain any queued plan commands, keeping only the most recent
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let BuilderCommand::Plan = next_cmd {
                    log::debug!("Discarding queued plan request, using newer request");
                } else {
                    // Edits still apply in order; the single plan runs after them
                    Box::pin(process_command(next_cmd, session, command_rx, update_tx)).await;
                }
            }

            handle_plan(session, update_tx).await;
        }
        BuilderCommand::CalculateStats => {
            handle_calculate_stats(session, update_tx).await;
        }
    }
}

fn send_sequence_or_error<S>(
    result: press_impose::Result<()>,
    session: &Session<S>,
    update_tx: &mpsc::UnboundedSender<BuilderUpdate>,
) where
    S: DocumentStore,
{
    let update = match result {
        Ok(()) => BuilderUpdate::SequenceChanged {
            sequence: session.sequence().clone(),
        },
        Err(e) => BuilderUpdate::Error {
            message: e.to_string(),
        },
    };
    let _ = update_tx.send(update);
}

async fn handle_plan<S>(session: &Session<S>, update_tx: &mpsc::UnboundedSender<BuilderUpdate>)
where
    S: DocumentStore,
{
    let specification = match session.resolve() {
        Ok(specification) => specification,
        Err(errors) => {
            let _ = update_tx.send(BuilderUpdate::SpecificationRejected { errors });
            return;
        }
    };

    match plan_async(session.sequence().clone(), specification).await {
        Ok(layout) => {
            log::info!("Planned {} sheets", layout.sheets.len());
            let _ = update_tx.send(BuilderUpdate::LayoutReady { layout });
        }
        Err(e) => {
            let _ = update_tx.send(BuilderUpdate::Error {
                message: format!("Failed to plan layout: {}", e),
            });
        }
    }
}

async fn handle_calculate_stats<S>(
    session: &Session<S>,
    update_tx: &mpsc::UnboundedSender<BuilderUpdate>,
) where
    S: DocumentStore,
{
    let specification = match session.resolve() {
        Ok(specification) => specification,
        Err(errors) => {
            let _ = update_tx.send(BuilderUpdate::SpecificationRejected { errors });
            return;
        }
    };

    let sequence = session.sequence().clone();
    match plan_async(sequence.clone(), specification).await {
        Ok(layout) => {
            let stats = layout_statistics(&sequence, &layout);
            let _ = update_tx.send(BuilderUpdate::StatsCalculated { stats });
        }
        Err(e) => {
            let _ = update_tx.send(BuilderUpdate::Error {
                message: format!("Failed to calculate statistics: {}", e),
            });
        }
    }
}
