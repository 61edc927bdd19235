// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android dispatcher via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Calls are handed to a single worker thread that
// is attached to the JVM once and invokes
//
//     static void execute(String action, String argsJson)
//
// on the configured dispatcher class. The Java side is expected to run the
// matching analytics SDK call; any exception it throws is reported back as
// the call's failure.
//
// The dispatcher class is resolved through the hosting Activity's class
// loader, since a natively attached thread only sees the system loader.

#![cfg(target_os = "android")]

use std::sync::mpsc;
use std::thread;

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use metrica_core::error::{MetricaError, Result};

use crate::resolve::ResolveOnce;
use crate::traits::{Completion, NativeCall, NativeDispatch};

const EXECUTE_SIGNATURE: &str = "(Ljava/lang/String;Ljava/lang/String;)V";

/// Local references reserved per job: class loading plus one call and the
/// exception text.
const LOCAL_FRAME_CAPACITY: i32 = 16;

struct Job {
    call: NativeCall,
    on_complete: Completion,
}

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain the process [`JavaVM`] from the global Android context.
fn java_vm() -> Result<JavaVM> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| jni_err("failed to obtain JavaVM", e))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(MetricaError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `MetricaError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> MetricaError {
    MetricaError::Bridge(format!("{context}: {e}"))
}

/// Take the pending Java exception, if any, and return its message. The
/// throwable and its text are locals of the caller's frame.
fn take_exception(env: &mut JNIEnv<'_>) -> Option<String> {
    if !env.exception_check().unwrap_or(false) {
        return None;
    }
    let throwable = env.exception_occurred().ok();
    let _ = env.exception_clear();

    let message = throwable
        .and_then(|t| {
            env.call_method(&t, "toString", "()Ljava/lang/String;", &[])
                .ok()
        })
        .and_then(|v| v.l().ok())
        .and_then(|obj| {
            let text: Option<String> = env.get_string(&JString::from(obj)).ok().map(Into::into);
            text
        });
    Some(message.unwrap_or_else(|| "Java exception".into()))
}

/// Load `class_name` (slash-separated) through the Activity's class loader.
/// Only the returned global reference outlives the caller's frame.
fn load_dispatcher_class(env: &mut JNIEnv<'_>, class_name: &str) -> Result<GlobalRef> {
    let activity = activity()?;
    let loader = env
        .call_method(&activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| jni_err("getClassLoader", e))?
        .l()
        .map_err(|e| jni_err("getClassLoader->l", e))?;

    let j_name = env
        .new_string(class_name.replace('/', "."))
        .map_err(|e| jni_err("new_string(class)", e))?;

    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| match take_exception(env) {
            Some(message) => MetricaError::Bridge(format!("loadClass({class_name}): {message}")),
            None => jni_err("loadClass", e),
        })?
        .l()
        .map_err(|e| jni_err("loadClass->l", e))?;

    env.new_global_ref(class)
        .map_err(|e| jni_err("new_global_ref(class)", e))
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Android implementation of [`NativeDispatch`].
///
/// Calls never block the caller: they are queued to a worker thread and
/// executed there in submission order.
pub struct AndroidDispatch {
    jobs: Option<mpsc::Sender<Job>>,
}

impl AndroidDispatch {
    /// Spawn the worker thread. JNI is not touched until the first call.
    pub fn new(class_name: &str) -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        let class_name = class_name.to_string();

        let spawned = thread::Builder::new()
            .name("metrica-dispatch".into())
            .spawn(move || run_worker(rx, class_name));

        match spawned {
            Ok(_) => Self { jobs: Some(tx) },
            Err(e) => {
                tracing::error!(error = %e, "failed to spawn native dispatch thread");
                Self { jobs: None }
            }
        }
    }
}

impl NativeDispatch for AndroidDispatch {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn dispatch(&self, call: NativeCall, on_complete: Completion) {
        let Some(jobs) = &self.jobs else {
            on_complete(Err(MetricaError::Bridge(
                "native dispatch thread is not running".into(),
            )));
            return;
        };
        if let Err(mpsc::SendError(job)) = jobs.send(Job { call, on_complete }) {
            (job.on_complete)(Err(MetricaError::Bridge(
                "native dispatch thread has exited".into(),
            )));
        }
    }
}

/// Worker loop: attach once, resolve the dispatcher class on first use, then
/// run each job and report its outcome.
///
/// The thread stays attached, so local references are only freed when a
/// frame is popped; every job runs in its own local frame. A class that fails
/// to load is not retried.
fn run_worker(jobs: mpsc::Receiver<Job>, class_name: String) {
    let vm = match java_vm() {
        Ok(vm) => vm,
        Err(e) => return fail_all(jobs, &e.to_string()),
    };
    let mut env = match vm.attach_current_thread_permanently() {
        Ok(env) => env,
        Err(e) => return fail_all(jobs, &format!("failed to attach JNI thread: {e}")),
    };

    let mut class = ResolveOnce::<GlobalRef>::new();

    for job in jobs {
        let outcome = env
            .with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
                let outcome = class
                    .get_or_resolve(|| load_dispatcher_class(env, &class_name))
                    .and_then(|class| execute(env, class, &job.call));
                Ok::<_, jni::errors::Error>(outcome)
            })
            .unwrap_or_else(|e| Err(jni_err("local frame", e)));
        (job.on_complete)(outcome);
    }
}

fn fail_all(jobs: mpsc::Receiver<Job>, reason: &str) {
    tracing::error!(reason, "native dispatch unavailable");
    for job in jobs {
        (job.on_complete)(Err(MetricaError::Bridge(reason.to_string())));
    }
}

/// Call `execute(action, argsJson)` on the dispatcher class.
fn execute(env: &mut JNIEnv<'_>, class: &GlobalRef, call: &NativeCall) -> Result<()> {
    let args_json = call.args_json()?;

    let j_action = env
        .new_string(call.name())
        .map_err(|e| jni_err("new_string(action)", e))?;
    let j_args = env
        .new_string(&args_json)
        .map_err(|e| jni_err("new_string(args)", e))?;

    let class: &JClass = class.as_obj().into();
    let result = env.call_static_method(
        class,
        "execute",
        EXECUTE_SIGNATURE,
        &[JValue::Object(&j_action), JValue::Object(&j_args)],
    );

    if let Some(message) = take_exception(env) {
        return Err(MetricaError::Dispatch {
            operation: call.name().to_string(),
            description: message,
        });
    }
    result
        .map(|_| ())
        .map_err(|e| jni_err(call.name(), e))
}
