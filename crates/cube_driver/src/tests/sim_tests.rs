use super::*;

struct FixedMac(Option<String>);

#[async_trait]
impl MacAddressProvider for FixedMac {
    async fn resolve(&self, _device_name: &str, _is_fallback: bool) -> Option<String> {
        self.0.clone()
    }
}

#[tokio::test]
async fn connect_uses_preset_mac_without_asking_provider() {
    let connector = SimulatedConnector::new(MoveScript::default());
    let session = connector.connect(Arc::new(FixedMac(None))).await.unwrap();
    assert_eq!(session.device_mac(), "AB:12:34:5F:70:BE");
    assert_eq!(session.device_name(), "GAN-SIM-001");
}

#[tokio::test]
async fn connect_falls_back_to_provider_when_mac_unknown() {
    let connector = SimulatedConnector::new(MoveScript::default()).without_known_mac();
    let session = connector
        .connect(Arc::new(FixedMac(Some("00:11:22:33:44:55".to_string()))))
        .await
        .unwrap();
    assert_eq!(session.device_mac(), "00:11:22:33:44:55");
}

#[tokio::test]
async fn connect_fails_when_provider_cannot_resolve() {
    let connector = SimulatedConnector::new(MoveScript::default()).without_known_mac();
    let err = connector.connect(Arc::new(FixedMac(None))).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn query_commands_answer_with_matching_events() {
    let connector = SimulatedConnector::new(MoveScript::default());
    let session = connector.connect(Arc::new(FixedMac(None))).await.unwrap();
    let mut events = session.subscribe_events();

    session
        .send_command(CubeCommand::RequestHardware)
        .await
        .unwrap();
    session
        .send_command(CubeCommand::RequestFacelets)
        .await
        .unwrap();
    session
        .send_command(CubeCommand::RequestBattery)
        .await
        .unwrap();

    match events.recv().await.unwrap() {
        CubeEvent::Hardware(info) => {
            assert_eq!(info.hardware_name.as_deref(), Some("GAN356i Carry Sim"));
        }
        other => panic!("expected hardware event, got {other:?}"),
    }
    match events.recv().await.unwrap() {
        CubeEvent::Facelets { facelets } => assert_eq!(facelets, SOLVED_FACELETS),
        other => panic!("expected facelets event, got {other:?}"),
    }
    match events.recv().await.unwrap() {
        CubeEvent::Battery { level } => assert_eq!(level, 87),
        other => panic!("expected battery event, got {other:?}"),
    }
}

#[tokio::test]
async fn script_replay_emits_moves_then_disconnect() {
    let script = MoveScript {
        moves: vec![
            ScriptedMove {
                notation: "R".to_string(),
                delay_ms: 0,
            },
            ScriptedMove {
                notation: "U'".to_string(),
                delay_ms: 0,
            },
        ],
    };
    let connector = SimulatedConnector::new(script);
    let session = connector.connect(Arc::new(FixedMac(None))).await.unwrap();
    let mut events = session.subscribe_events();

    let mut notations = Vec::new();
    loop {
        match events.recv().await.unwrap() {
            CubeEvent::Move(m) => notations.push(m.notation),
            CubeEvent::Disconnect => break,
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(notations, vec!["R", "U'"]);
}

#[tokio::test]
async fn script_parses_from_json() {
    let script = MoveScript::from_json(r#"{"moves":[{"notation":"R","delay_ms":50}]}"#).unwrap();
    assert_eq!(script.moves.len(), 1);
    assert_eq!(script.moves[0].notation, "R");
    assert!(MoveScript::from_json("not json").is_err());
}
