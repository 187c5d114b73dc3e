// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal end-to-end demo: a few threads record simulated latencies,
//! then one distribution dump and one Guesstimate export are produced
//! under ./sandbox_out.

use orrery_telemetry::{CollectorConfig, CollectorService, ScopedLatencyTimer};
use std::path::PathBuf;
use std::time::Duration;

const ARCH_DESCRIPTOR: &str = r#"{
    "arch": "demoarch",
    "version": "arch-0.1",
    "args": "-a demoarch",
    "services": [
        {"name": "auth", "package": "karyon", "regions": 1, "count": 2,
         "dependencies": ["store"], "useCustomGuesstimate": true,
         "guesstimateType": "MIXTURE", "guesstimateValue": "normal(10,2)"},
        {"name": "store", "package": "cassandra", "regions": 1, "count": 3,
         "dependencies": []}
    ]
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let root = PathBuf::from("sandbox_out");
    let config = CollectorConfig {
        csv_dir: root.join("csv_metrics"),
        json_metrics_dir: root.join("json_metrics"),
        arch_dir: root.join("json_arch"),
        ..CollectorConfig::enabled()
    };
    std::fs::create_dir_all(&config.csv_dir)?;
    std::fs::create_dir_all(&config.json_metrics_dir)?;
    std::fs::create_dir_all(&config.arch_dir)?;
    std::fs::write(config.arch_dir.join("demoarch_arch.json"), ARCH_DESCRIPTOR)?;

    let service = CollectorService::new(config);
    let web = service.register_histogram("demoarch.us-east.zoneA.web.web1");
    let auth = service.register_histogram("demoarch.us-east.zoneA.auth.auth1");
    let store = service.register_histogram("demoarch.us-east.zoneA.store.store1");

    let workers: Vec<_> = [web.clone(), auth, store]
        .into_iter()
        .map(|handle| {
            std::thread::spawn(move || {
                for i in 0..500u64 {
                    let _timer = ScopedLatencyTimer::new(&handle);
                    // Pretend to do some work; occasionally exceed the
                    // one-millisecond observation ceiling.
                    if i % 100 == 0 {
                        std::thread::sleep(Duration::from_micros(1500));
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    service.save_histogram(&web, "demoarch.us-east.zoneA.web.web1", "_demo");
    if let Some(path) = service.export_guesses("demoarch.us-east.zoneA.web.web1") {
        log::info!("Demo export written to {}", path.display());
        println!("wrote {}", path.display());
    }

    Ok(())
}
