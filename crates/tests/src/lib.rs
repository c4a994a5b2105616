//! # Integration Tests
//!
//! End-to-end tests over the full workspace: configuration through provider,
//! registry, dispatch, and both sink kinds. No external daemon is required;
//! the memory provider and a bound Unix datagram socket stand in for the
//! collaborators.

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::TargetKind::Fd;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::path::Path;
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{StateProvider, TemplateSpec};
    use dispatcher::{shared_scratch, Dispatcher, Registry};
    use provider::{MemoryProvider, SubstRenderer};
    use tempfile::tempdir;

    fn write_file(path: &Path, body: &str) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
    }

    fn load_specs(config: &str) -> Vec<TemplateSpec> {
        let (specs, _faults) = ConfigLoader::load_from_str(config, ConfigFormat::Toml).unwrap();
        specs
    }

    fn bind_queue(path: &Path) -> std::os::unix::net::UnixDatagram {
        let socket = std::os::unix::net::UnixDatagram::bind(path).unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        socket
    }

    fn recv_message(socket: &std::os::unix::net::UnixDatagram) -> String {
        let mut buf = vec![0u8; 64 * 1024];
        let n = socket.recv(&mut buf).unwrap();
        buf.truncate(n);
        String::from_utf8(buf).unwrap()
    }

    /// Full stream path: variable change -> notification -> dispatch ->
    /// substitution -> target file, closed again afterwards.
    #[tokio::test]
    async fn test_stream_template_renders_on_change() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("value.tmpl");
        write_file(&template_path, "value={{X}}");
        let target_path = dir.path().join("out.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["X"]
template = "{}"
target = "{}"
"#,
            template_path.display(),
            target_path.display()
        );

        let store = MemoryProvider::new();
        store.define("X", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("X", "42");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();

        assert_eq!(std::fs::read_to_string(&target_path).unwrap(), "value=42");
        assert!(!engine.registry().templates()[0].sink_is_open());
    }

    /// keep_open on a queue target: the first notification opens the queue,
    /// the second reuses the same handle.
    #[tokio::test]
    async fn test_queue_template_reuses_handle_when_kept_open() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("event.tmpl");
        write_file(&template_path, "event={{Y}}");
        let queue_path = dir.path().join("events.sock");
        let receiver = bind_queue(&queue_path);

        let config = format!(
            r#"
[[templates]]
trigger = ["Y"]
template = "{}"
type = "mq"
target = "{}"
keep_open = true
"#,
            template_path.display(),
            queue_path.display()
        );

        let store = MemoryProvider::new();
        store.define("Y", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("Y", "first");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();
        assert!(engine.registry().templates()[0].sink_is_open());

        store.set("Y", "second");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();
        assert!(engine.registry().templates()[0].sink_is_open());

        assert_eq!(recv_message(&receiver), "event=first");
        assert_eq!(recv_message(&receiver), "event=second");
    }

    /// A trigger name the provider does not know stays inert; the template
    /// still renders when its other, valid trigger fires.
    #[tokio::test]
    async fn test_unresolved_trigger_does_not_block_sibling_trigger() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("mixed.tmpl");
        write_file(&template_path, "ok={{/sys/ok}}");
        let target_path = dir.path().join("out.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["/sys/missing", "/sys/ok"]
template = "{}"
target = "{}"
"#,
            template_path.display(),
            target_path.display()
        );

        let store = MemoryProvider::new();
        store.define("/sys/ok", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);

        // The template is registered despite the unresolved trigger.
        assert_eq!(registry.len(), 1);

        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("/sys/ok", "yes");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();

        assert_eq!(std::fs::read_to_string(&target_path).unwrap(), "ok=yes");
    }

    /// append accumulates across renders; truncate starts over each open.
    #[tokio::test]
    async fn test_append_and_truncate_lifecycles() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("line.tmpl");
        write_file(&template_path, "n={{N}}\n");
        let append_target = dir.path().join("append.log");
        let truncate_target = dir.path().join("latest.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["N"]
template = "{t}"
target = "{a}"
append = true

[[templates]]
trigger = ["N"]
template = "{t}"
target = "{o}"
"#,
            t = template_path.display(),
            a = append_target.display(),
            o = truncate_target.display()
        );

        let store = MemoryProvider::new();
        store.define("N", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        for value in ["1", "2"] {
            store.set("N", value);
            let changed = conn.wait_for_next_change().await.unwrap();
            engine.dispatch(changed).await.unwrap();
        }

        assert_eq!(
            std::fs::read_to_string(&append_target).unwrap(),
            "n=1\nn=2\n"
        );
        assert_eq!(std::fs::read_to_string(&truncate_target).unwrap(), "n=2\n");
    }

    /// A shorter queue message after a longer one carries no stale bytes
    /// from the shared scratch buffer.
    #[tokio::test]
    async fn test_queue_messages_do_not_leak_between_templates() {
        let dir = tempdir().unwrap();
        let long_template = dir.path().join("long.tmpl");
        write_file(&long_template, "a rather long message about {{A}}");
        let short_template = dir.path().join("short.tmpl");
        write_file(&short_template, "{{B}}");
        let queue_path = dir.path().join("q.sock");
        let receiver = bind_queue(&queue_path);

        let config = format!(
            r#"
[[templates]]
trigger = ["A"]
template = "{long}"
type = "mq"
target = "{q}"

[[templates]]
trigger = ["B"]
template = "{short}"
type = "mq"
target = "{q}"
"#,
            long = long_template.display(),
            short = short_template.display(),
            q = queue_path.display()
        );

        let store = MemoryProvider::new();
        store.define("A", "0");
        store.define("B", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("A", "everything");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();

        store.set("B", "hi");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();

        assert_eq!(
            recv_message(&receiver),
            "a rather long message about everything"
        );
        assert_eq!(recv_message(&receiver), "hi");
    }

    /// One template's failure never blocks its siblings in the same pass,
    /// and the pass reports the failure.
    #[tokio::test]
    async fn test_sibling_templates_survive_a_failing_one() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("v.tmpl");
        write_file(&template_path, "{{V}}");
        let bad_target = dir.path().join("no-such-dir").join("out.txt");
        let good_target = dir.path().join("good.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["V"]
template = "{t}"
target = "{bad}"

[[templates]]
trigger = ["V"]
template = "{t}"
target = "{good}"
"#,
            t = template_path.display(),
            bad = bad_target.display(),
            good = good_target.display()
        );

        let store = MemoryProvider::new();
        store.define("V", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("V", "x");
        let changed = conn.wait_for_next_change().await.unwrap();
        let result = engine.dispatch(changed).await;

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&good_target).unwrap(), "x");
    }

    /// A notification for a variable no template watches renders nothing.
    #[tokio::test]
    async fn test_unrelated_change_renders_nothing() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("v.tmpl");
        write_file(&template_path, "{{V}}");
        let target_path = dir.path().join("out.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["V"]
template = "{}"
target = "{}"
"#,
            template_path.display(),
            target_path.display()
        );

        let store = MemoryProvider::new();
        store.define("V", "0");
        let unrelated = store.define("other", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        engine.dispatch(unrelated).await.unwrap();

        assert!(!target_path.exists());
        assert_eq!(engine.stats().renders, 0);
    }

    /// Incomplete config entries are skipped while the rest keep working,
    /// end to end.
    #[tokio::test]
    async fn test_screened_out_entry_leaves_rest_working() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("v.tmpl");
        write_file(&template_path, "{{V}}");
        let target_path = dir.path().join("out.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["V"]
template = "/somewhere.tmpl"

[[templates]]
trigger = ["V"]
template = "{}"
target = "{}"
"#,
            template_path.display(),
            target_path.display()
        );

        let (specs, faults) = ConfigLoader::load_from_str(&config, ConfigFormat::Toml).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(faults.len(), 1);

        let store = MemoryProvider::new();
        store.define("V", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&specs, &mut conn, &scratch);
        let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        store.set("V", "ok");
        let changed = conn.wait_for_next_change().await.unwrap();
        engine.dispatch(changed).await.unwrap();

        assert_eq!(std::fs::read_to_string(&target_path).unwrap(), "ok");
    }

    /// The full loop shape: notifications dispatched until shutdown, sinks
    /// closed on the way out.
    #[tokio::test]
    async fn test_run_loop_until_shutdown() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("v.tmpl");
        write_file(&template_path, "{{V}}");
        let target_path = dir.path().join("out.txt");

        let config = format!(
            r#"
[[templates]]
trigger = ["V"]
template = "{}"
target = "{}"
keep_open = true
"#,
            template_path.display(),
            target_path.display()
        );

        let store = MemoryProvider::new();
        store.define("V", "0");
        let mut conn = store.connect();
        let scratch = shared_scratch(1024);
        let registry = Registry::from_plan(&load_specs(&config), &mut conn, &scratch);
        let engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        // Queue a change before the loop starts, then let the timed
        // shutdown end the idle loop.
        store.set("V", "done");
        let shutdown = tokio::time::sleep(Duration::from_millis(500));
        let stats = engine.run(&mut conn, shutdown).await;

        assert_eq!(stats.notifications, 1);
        assert_eq!(stats.renders, 1);
        assert_eq!(std::fs::read_to_string(&target_path).unwrap(), "done");
    }
}
